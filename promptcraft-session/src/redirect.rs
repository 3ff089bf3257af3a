/// Receives the forced navigation to the login entry point once the session
/// is beyond recovery. In-memory session state must not be trusted after
/// this fires.
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self, login_path: &str);
}

/// Ignores redirects, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRedirect;

impl LoginRedirect for NoRedirect {
    fn redirect_to_login(&self, _login_path: &str) {}
}
