use crate::cli::{AdminCommand, ChallengeAction, Command, UsersAction};
use crate::render;
use anyhow::{bail, Context, Result};
use promptcraft_api::endpoints::challenges::{Category, Difficulty, NewChallenge};
use promptcraft_api::Request;
use promptcraft_session::{AuthService, SessionClient, SessionContext, Transport};
use serde::Serialize;
use std::io::{self, BufRead, Read, Write};
use tracing::{info, warn};

/// Run one subcommand, writing its output to `out`. With `json` set the
/// response data is printed as-is instead of rendered.
pub async fn execute<S: Transport, W: Write>(
    command: Command,
    json: bool,
    client: &SessionClient<S>,
    context: &mut SessionContext,
    out: &mut W,
) -> Result<()> {
    if command.requires_session() && !context.is_authenticated() {
        bail!("Not signed in. Run `promptcraft login <email>` first.");
    }

    let auth = AuthService::new(client);

    match command {
        Command::Register {
            username,
            email,
            password,
        } => {
            let password = password_or_stdin(password)?;
            let user = auth.register(context, &username, &email, &password).await?;
            emit(out, json, &user, |u| format!("Welcome, {}!\n", u.username))
        }

        Command::Login { email, password } => {
            let password = password_or_stdin(password)?;
            let user = auth.login(context, &email, &password).await?;
            emit(out, json, &user, |u| format!("Signed in as {}.\n", u.username))
        }

        Command::Logout => {
            auth.logout(context).await?;
            writeln!(out, "Signed out.")?;
            Ok(())
        }

        Command::Whoami => {
            if !context.is_authenticated() {
                writeln!(out, "Not signed in.")?;
                return Ok(());
            }
            let user = auth.me(context).await?;
            emit(out, json, &user, render::user)
        }

        Command::Challenges {
            category,
            difficulty,
            page,
            limit,
        } => {
            let mut req = Request::challenges().list().page(page);
            if let Some(category) = category {
                req = req.category(Category::from(category.as_str()));
            }
            if let Some(difficulty) = difficulty {
                req = req.difficulty(Difficulty::from(difficulty.as_str()));
            }
            if let Some(limit) = limit {
                req = req.limit(limit);
            }

            let resp = client.send(&req).await?;
            let meta = resp.meta.clone();
            let challenges = resp.into_data()?;
            emit(out, json, &challenges, |c| {
                render::challenge_list(c, meta.as_ref())
            })
        }

        Command::Challenge { id } => {
            let challenge = client
                .send(&Request::challenges().get(id.as_str()))
                .await?
                .into_data()?;

            // Statistics are a nice-to-have; the challenge is still worth showing.
            let stats = match client.send(&Request::challenges().stats(id.as_str())).await {
                Ok(resp) => resp.into_data().ok(),
                Err(e) => {
                    warn!(challenge = %id, error = %e, "Failed to load challenge stats");
                    None
                }
            };

            if json {
                let value = serde_json::json!({ "challenge": challenge, "stats": stats });
                writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
                return Ok(());
            }
            write!(out, "{}", render::challenge_detail(&challenge, stats.as_ref()))?;
            Ok(())
        }

        Command::Evaluate {
            challenge_id,
            source,
        } => {
            let prompt = read_source(&source)?;
            if prompt.trim().is_empty() {
                bail!("Prompt is empty");
            }
            if !json {
                write!(out, "{}", render::prompt_summary(&prompt))?;
            }

            let req = Request::evaluations().evaluate(challenge_id.as_str(), prompt);
            let evaluation = client.send(&req).await?.into_data()?;
            info!(
                attempt = %evaluation.attempt_id,
                grade = %evaluation.result.grade,
                "Prompt evaluated"
            );
            emit(out, json, &evaluation, |e| {
                format!("{}Attempt {}\n", render::evaluation(&e.result), e.attempt_id)
            })
        }

        Command::Attempts { page, limit } => {
            let req = Request::evaluations().my_attempts().page(page).limit(limit);
            let resp = client.send(&req).await?;
            let meta = resp.meta.clone();
            let attempts = resp.into_data()?;
            emit(out, json, &attempts, |a| {
                render::attempt_list(a, meta.as_ref())
            })
        }

        Command::Attempt { id } => {
            let attempt = client
                .send(&Request::evaluations().attempt(id.as_str()))
                .await?
                .into_data()?;
            emit(out, json, &attempt, render::attempt_detail)
        }

        Command::Leaderboard { challenge: None } => {
            let entries = client
                .send(&Request::leaderboard().global())
                .await?
                .into_data()?;
            emit(out, json, &entries, |e| render::leaderboard(e))
        }

        Command::Leaderboard {
            challenge: Some(id),
        } => {
            let entries = client
                .send(&Request::leaderboard().challenge(id.as_str()))
                .await?
                .into_data()?;
            emit(out, json, &entries, |e| render::challenge_leaderboard(e))
        }

        Command::Rank => {
            let rank = client
                .send(&Request::leaderboard().my_rank())
                .await?
                .into_data()?;
            emit(out, json, &rank, render::rank)
        }

        Command::Admin { command } => {
            if !context.user().is_some_and(|u| u.is_admin()) {
                bail!("Admin role required");
            }
            admin(command, json, client, out).await
        }
    }
}

async fn admin<S: Transport, W: Write>(
    command: AdminCommand,
    json: bool,
    client: &SessionClient<S>,
    out: &mut W,
) -> Result<()> {
    match command {
        AdminCommand::Challenge {
            action: ChallengeAction::Create { source },
        } => {
            let definition: NewChallenge = serde_json::from_str(&read_source(&source)?)
                .context("Invalid challenge definition")?;
            let created = client
                .send(&Request::challenges().create(definition))
                .await?
                .into_data()?;
            info!(challenge = %created.id, "Challenge created");
            emit(out, json, &created, |c| {
                format!("Created challenge {} ({}).\n", c.id, c.title)
            })
        }

        AdminCommand::Challenge {
            action:
                ChallengeAction::Update {
                    id,
                    title,
                    category,
                    difficulty,
                    instruction,
                    tags,
                    minutes,
                    active,
                },
        } => {
            let mut req = Request::challenges().update(id.as_str());
            let mut changed = false;
            if let Some(title) = title {
                req = req.title(title);
                changed = true;
            }
            if let Some(category) = category {
                req = req.category(Category::from(category.as_str()));
                changed = true;
            }
            if let Some(difficulty) = difficulty {
                req = req.difficulty(Difficulty::from(difficulty.as_str()));
                changed = true;
            }
            if let Some(instruction) = instruction {
                req = req.instruction(instruction);
                changed = true;
            }
            if !tags.is_empty() {
                req = req.tags(tags);
                changed = true;
            }
            if let Some(minutes) = minutes {
                req = req.estimated_minutes(minutes);
                changed = true;
            }
            if let Some(active) = active {
                req = req.is_active(active);
                changed = true;
            }
            if !changed {
                bail!("Nothing to update");
            }

            let updated = client.send(&req).await?.into_data()?;
            info!(challenge = %updated.id, "Challenge updated");
            emit(out, json, &updated, |c| format!("Updated challenge {}.\n", c.id))
        }

        AdminCommand::Challenge {
            action: ChallengeAction::Delete { id },
        } => {
            client
                .send(&Request::challenges().delete(id.as_str()))
                .await?;
            info!(challenge = %id, "Challenge deleted");
            writeln!(out, "Deleted challenge {}.", id)?;
            Ok(())
        }

        AdminCommand::Users {
            action: UsersAction::List,
        } => {
            let users = client.send(&Request::users().list()).await?.into_data()?;
            emit(out, json, &users, |u| render::user_list(u))
        }

        AdminCommand::Users {
            action: UsersAction::Delete { id },
        } => {
            client.send(&Request::users().delete(id.as_str())).await?;
            info!(user = %id, "User deleted");
            writeln!(out, "Deleted user {}.", id)?;
            Ok(())
        }
    }
}

fn emit<T, W, F>(out: &mut W, json: bool, data: &T, render: F) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
    F: FnOnce(&T) -> String,
{
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(data)?)?;
    } else {
        write!(out, "{}", render(data))?;
    }
    Ok(())
}

/// Contents of a file, or of stdin when `source` is `-`.
pub fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))
}

fn password_or_stdin(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("Password is required");
    }
    Ok(password)
}
