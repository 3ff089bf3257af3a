use promptcraft_session::LoginRedirect;
use std::io::Write;
use std::sync::Mutex;
use tracing::info;

/// There is no page to navigate to in a terminal, so sending the user back to
/// sign in means telling them how to do it. The `login` subcommand is the
/// entry point; a login path configured as a full URL is offered as well.
pub struct TerminalRedirect<W: Write + Send = std::io::Stderr> {
    out: Mutex<W>,
}

impl TerminalRedirect {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> TerminalRedirect<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> LoginRedirect for TerminalRedirect<W> {
    fn redirect_to_login(&self, login_path: &str) {
        info!(login_path, "Session ended, asking user to sign in again");
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(out, "{}", sign_in_hint(login_path));
    }
}

fn sign_in_hint(login_path: &str) -> String {
    let mut hint =
        "Your session has expired. Sign in again with `promptcraft login <email>`".to_string();
    if login_path.starts_with("http://") || login_path.starts_with("https://") {
        hint.push_str(" or at ");
        hint.push_str(login_path);
    }
    hint.push('.');
    hint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_sign_in_hint() {
        let redirect = TerminalRedirect::new(Vec::new());
        redirect.redirect_to_login("/login");
        let text = String::from_utf8(redirect.into_inner()).unwrap();
        assert_eq!(
            text,
            "Your session has expired. Sign in again with `promptcraft login <email>`.\n"
        );
    }

    #[test]
    fn web_login_url_is_offered() {
        let redirect = TerminalRedirect::new(Vec::new());
        redirect.redirect_to_login("https://promptcraft.dev/login");
        let text = String::from_utf8(redirect.into_inner()).unwrap();
        assert!(text.ends_with(" or at https://promptcraft.dev/login.\n"));
    }
}
