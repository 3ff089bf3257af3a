use clap::Parser;
use promptcraft::cli::{Cli, Command};
use promptcraft::commands::execute;
use promptcraft_api::endpoints::auth::{Role, TokenPair, User};
use promptcraft_api::Method;
use promptcraft_session::testing::{
    envelope, sample_user, unauthorized, RecordingRedirect, ScriptedTransport,
};
use promptcraft_session::{
    session_chain, ApiRequest, BearerAuth, CredentialStore, MemoryStorage, RawResponse,
    RefreshOnUnauthorized, SessionClient, SessionContext, SessionError,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn evaluation() -> Value {
    json!({
        "totalScore": 8.4,
        "grade": "A",
        "clarityScore": 9.0,
        "specificityScore": 8.0,
        "contextScore": 8.0,
        "structureScore": 8.5,
        "completenessScore": 8.5,
        "suggestions": ["State the expected output format"],
        "strengths": ["Clear persona"],
        "evaluatorType": "heuristic",
        "wordCount": 6
    })
}

fn challenge() -> Value {
    json!({
        "id": "c-1",
        "title": "REST API design",
        "category": "Backend",
        "difficulty": "Intermediate",
        "instruction": "Ask for an OpenAPI spec for a bookstore.",
        "estimatedMinutes": 15,
        "isActive": true,
        "createdAt": "2025-01-15T09:30:00Z",
        "updatedAt": "2025-01-15T09:30:00Z"
    })
}

fn admin_user() -> User {
    let mut user = sample_user("admin");
    user.role = Role::Admin;
    user
}

fn backend(req: &ApiRequest) -> Result<RawResponse, SessionError> {
    match (req.method.clone(), req.path.as_str()) {
        (Method::POST, "/auth/login") => Ok(envelope(json!({
            "user": sample_user("u1"),
            "accessToken": "access-1",
            "refreshToken": "refresh-1"
        }))),
        (Method::GET, "/auth/me") => Ok(envelope(json!(sample_user("u1")))),
        (Method::POST, "/evaluate") => Ok(envelope(json!({
            "attemptId": "att-1",
            "result": evaluation()
        }))),
        (Method::GET, "/leaderboard/my-rank") => Ok(envelope(json!({"rank": 2, "total": 10}))),
        (Method::GET, "/leaderboard") => Ok(envelope(json!([{
            "id": "u1",
            "username": "user-u1",
            "bestScore": 9.1,
            "totalAttempts": 4,
            "averageScore": 7.5,
            "rank": 1
        }]))),
        (Method::POST, "/challenges") | (Method::PUT, "/challenges/c-1") => {
            Ok(envelope(challenge()))
        }
        (Method::DELETE, "/challenges/c-1") | (Method::DELETE, "/users/u2") => {
            Ok(envelope(Value::Null))
        }
        (Method::GET, "/users") => Ok(envelope(json!([admin_user(), sample_user("u2")]))),
        _ => Ok(unauthorized()),
    }
}

type Chain = RefreshOnUnauthorized<BearerAuth<ScriptedTransport>, ScriptedTransport>;

struct Harness {
    client: SessionClient<Chain>,
    context: SessionContext,
    store: CredentialStore,
    redirect: RecordingRedirect,
}

impl Harness {
    fn new(transport: ScriptedTransport) -> Self {
        let store = CredentialStore::new(MemoryStorage::new());
        let redirect = RecordingRedirect::new();
        let client = SessionClient::with_transport(session_chain(
            transport,
            store.clone(),
            Arc::new(redirect.clone()),
            "/login",
        ));
        let mut context = SessionContext::new(store.clone());
        context.hydrate();
        Self {
            client,
            context,
            store,
            redirect,
        }
    }

    fn signed_in(transport: ScriptedTransport) -> Self {
        Self::signed_in_as(transport, sample_user("u1"))
    }

    fn signed_in_as(transport: ScriptedTransport, user: User) -> Self {
        let mut harness = Self::new(transport);
        let tokens = TokenPair {
            access_token: "access-1".into(),
            refresh_token: "refresh-1".into(),
        };
        harness.context.login(user, &tokens).unwrap();
        harness
    }

    async fn run(&mut self, args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("promptcraft").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        execute(cli.command, cli.json, &self.client, &mut self.context, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }
}

#[test]
fn parses_leaderboard_filter() {
    let cli = Cli::try_parse_from(["promptcraft", "leaderboard", "--challenge", "c1"]).unwrap();
    assert_eq!(
        cli.command,
        Command::Leaderboard {
            challenge: Some("c1".into())
        }
    );
    assert!(!cli.json);
}

#[test]
fn json_flag_is_global() {
    let cli = Cli::try_parse_from(["promptcraft", "rank", "--json"]).unwrap();
    assert!(cli.json);
    assert!(cli.command.requires_session());
}

#[test]
fn evaluate_needs_a_source() {
    assert!(Cli::try_parse_from(["promptcraft", "evaluate", "c1"]).is_err());
}

#[tokio::test]
async fn login_then_whoami() {
    let transport = ScriptedTransport::new(backend);
    let mut h = Harness::new(transport.clone());

    let out = h
        .run(&["login", "u1@example.com", "--password", "pw"])
        .await
        .unwrap();
    assert_eq!(out, "Signed in as user-u1.\n");
    assert_eq!(h.store.access_token().as_deref(), Some("access-1"));

    let out = h.run(&["whoami"]).await.unwrap();
    assert!(out.starts_with("user-u1 <u1@example.com>\n"));

    let me = transport.requests_to("/auth/me");
    assert_eq!(me[0].bearer.as_deref(), Some("access-1"));
}

#[tokio::test]
async fn whoami_when_signed_out_skips_backend() {
    let transport = ScriptedTransport::new(backend);
    let mut h = Harness::new(transport.clone());

    assert_eq!(h.run(&["whoami"]).await.unwrap(), "Not signed in.\n");
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn session_commands_refuse_without_login() {
    let transport = ScriptedTransport::new(backend);
    let mut h = Harness::new(transport.clone());

    let err = h.run(&["rank"]).await.unwrap_err();
    assert!(err.to_string().starts_with("Not signed in"));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn evaluate_reads_prompt_file() {
    let transport = ScriptedTransport::new(backend);
    let mut h = Harness::signed_in(transport.clone());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prompt.txt");
    std::fs::write(&path, "You are a senior Rust reviewer.\n").unwrap();

    let out = h
        .run(&["evaluate", "c1", path.to_str().unwrap()])
        .await
        .unwrap();
    assert!(out.starts_with("Submitting 6 words...\nScore: 8.4/10  Grade: A\n"));
    assert!(out.contains("  + Clear persona"));
    assert!(out.ends_with("Attempt att-1\n"));

    let sent = transport.requests_to("/evaluate");
    assert_eq!(
        sent[0].body,
        Some(json!({
            "challengeId": "c1",
            "promptText": "You are a senior Rust reviewer.\n"
        }))
    );
}

#[tokio::test]
async fn empty_prompt_is_rejected_locally() {
    let transport = ScriptedTransport::new(backend);
    let mut h = Harness::signed_in(transport.clone());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    std::fs::write(&path, "  \n").unwrap();

    let err = h
        .run(&["evaluate", "c1", path.to_str().unwrap()])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Prompt is empty");
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn json_output_is_raw_data() {
    let transport = ScriptedTransport::new(backend);
    let mut h = Harness::signed_in(transport);

    let out = h.run(&["rank", "--json"]).await.unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value, json!({"rank": 2, "total": 10}));

    let out = h.run(&["leaderboard"]).await.unwrap();
    assert!(out.starts_with("#1    user-u1"));
    assert!(out.contains("best  9.1  avg  7.5  (4 attempts)"));
}

#[tokio::test]
async fn expired_session_ends_with_redirect() {
    // Every authenticated call and the refresh itself are rejected.
    let transport = ScriptedTransport::new(|_req: &ApiRequest| Ok(unauthorized()));
    let mut h = Harness::signed_in(transport.clone());

    let err = h.run(&["rank"]).await.unwrap_err();
    assert!(err.to_string().contains("401"));
    assert_eq!(h.redirect.paths(), vec!["/login".to_string()]);
    assert_eq!(h.store.access_token(), None);
    assert_eq!(transport.requests_to("/auth/refresh").len(), 1);
}

#[tokio::test]
async fn admin_commands_need_admin_role() {
    let transport = ScriptedTransport::new(backend);
    let mut h = Harness::signed_in(transport.clone());

    let err = h.run(&["admin", "users", "list"]).await.unwrap_err();
    assert_eq!(err.to_string(), "Admin role required");
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn admin_creates_challenge_from_file() {
    let transport = ScriptedTransport::new(backend);
    let mut h = Harness::signed_in_as(transport.clone(), admin_user());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("challenge.json");
    std::fs::write(
        &path,
        r#"{
            "title": "REST API design",
            "category": "Backend",
            "difficulty": "Intermediate",
            "instruction": "Ask for an OpenAPI spec for a bookstore.",
            "estimatedMinutes": 15,
            "isActive": true
        }"#,
    )
    .unwrap();

    let out = h
        .run(&["admin", "challenge", "create", path.to_str().unwrap()])
        .await
        .unwrap();
    assert_eq!(out, "Created challenge c-1 (REST API design).\n");

    let sent = transport.requests_to("/challenges");
    assert_eq!(sent[0].method, Method::POST);
    assert_eq!(sent[0].bearer.as_deref(), Some("access-1"));
    let body = sent[0].body.as_ref().unwrap();
    assert_eq!(body["category"], "Backend");
    assert_eq!(body["tips"], json!([]));
}

#[tokio::test]
async fn admin_update_sends_only_changed_fields() {
    let transport = ScriptedTransport::new(backend);
    let mut h = Harness::signed_in_as(transport.clone(), admin_user());

    let out = h
        .run(&[
            "admin", "challenge", "update", "c-1", "--title", "Renamed", "--active", "false",
        ])
        .await
        .unwrap();
    assert_eq!(out, "Updated challenge c-1.\n");

    let sent = transport.requests_to("/challenges/c-1");
    assert_eq!(sent[0].method, Method::PUT);
    assert_eq!(
        sent[0].body,
        Some(json!({"title": "Renamed", "isActive": false}))
    );

    let err = h
        .run(&["admin", "challenge", "update", "c-1"])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Nothing to update");
    assert_eq!(transport.requests_to("/challenges/c-1").len(), 1);
}

#[tokio::test]
async fn admin_deletes_challenge() {
    let transport = ScriptedTransport::new(backend);
    let mut h = Harness::signed_in_as(transport.clone(), admin_user());

    let out = h.run(&["admin", "challenge", "delete", "c-1"]).await.unwrap();
    assert_eq!(out, "Deleted challenge c-1.\n");
    assert_eq!(
        transport.requests_to("/challenges/c-1")[0].method,
        Method::DELETE
    );
}

#[tokio::test]
async fn admin_lists_and_deletes_users() {
    let transport = ScriptedTransport::new(backend);
    let mut h = Harness::signed_in_as(transport.clone(), admin_user());

    let out = h.run(&["admin", "users", "list"]).await.unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("admin "));
    assert!(lines[0].contains(" admin "));
    assert!(lines[1].contains("user-u2"));

    let out = h.run(&["admin", "users", "delete", "u2"]).await.unwrap();
    assert_eq!(out, "Deleted user u2.\n");
    let sent = transport.requests_to("/users/u2");
    assert_eq!(sent[0].method, Method::DELETE);
    assert_eq!(sent[0].bearer.as_deref(), Some("access-1"));
}
