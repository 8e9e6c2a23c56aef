use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct UserInfo {
    id: String,
    email: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
    user: UserInfo,
}

#[derive(Debug, Deserialize)]
struct CheckInResponse {
    status: String,
    date: String,
    wake_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TrendPoint {
    day: String,
    date: String,
    time: Option<f64>,
    has_data: bool,
}

#[derive(Debug, Deserialize)]
struct TrendResponse {
    range: String,
    points: Vec<TrendPoint>,
    checked_in_today: bool,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

fn unique_db_path() -> String {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "wakeup_http_{}_{}.db",
        std::process::id(),
        unique_suffix()
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(resp) = client.get(base_url).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_wakeup_app"))
        .env("PORT", port.to_string())
        .env("APP_DB_PATH", unique_db_path())
        .env("APP_JWT_SECRET", "http-test-secret")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn register_user(server: &TestServer, client: &Client, nickname: &str) -> AuthResponse {
    let email = format!("u{}@example.com", unique_suffix());
    let response = client
        .post(format!("{}/api/register", server.base_url))
        .json(&serde_json::json!({
            "email": email,
            "password": "sunrise6",
            "nickname": nickname,
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success(), "register failed");
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_register_then_login() {
    let server = shared_server().await;
    let client = Client::new();

    let nickname = format!("晨风{}", unique_suffix());
    let registered = register_user(&server, &client, &nickname).await;
    assert!(!registered.token.is_empty());
    assert_eq!(registered.user.display_name, nickname);

    let login: AuthResponse = client
        .post(format!("{}/api/login", server.base_url))
        .json(&serde_json::json!({
            "email": registered.user.email,
            "password": "sunrise6",
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(login.user.id, registered.user.id);

    let me: UserInfo = client
        .get(format!("{}/api/me", server.base_url))
        .bearer_auth(&login.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me.display_name, nickname);
}

#[tokio::test]
async fn http_login_with_wrong_password_is_unauthorized() {
    let server = shared_server().await;
    let client = Client::new();

    let nickname = format!("夜猫{}", unique_suffix());
    let registered = register_user(&server, &client, &nickname).await;

    let response = client
        .post(format!("{}/api/login", server.base_url))
        .json(&serde_json::json!({
            "email": registered.user.email,
            "password": "wrongpass",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn http_check_in_twice_is_created_then_already() {
    let server = shared_server().await;
    let client = Client::new();

    let nickname = format!("早起{}", unique_suffix());
    let auth = register_user(&server, &client, &nickname).await;

    let first: CheckInResponse = client
        .post(format!("{}/api/checkin", server.base_url))
        .bearer_auth(&auth.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first.status, "created");
    let hour = first.wake_hour.expect("created check-in carries wake_hour");
    assert!((0.0..24.0).contains(&hour));

    let second: CheckInResponse = client
        .post(format!("{}/api/checkin", server.base_url))
        .bearer_auth(&auth.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second.status, "already_checked_in");
    assert_eq!(second.date, first.date);

    let trend: TrendResponse = client
        .get(format!("{}/api/trend?range=week", server.base_url))
        .bearer_auth(&auth.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(trend.range, "week");
    assert_eq!(trend.points.len(), 7);
    assert!(trend.checked_in_today);
    let last = trend.points.last().unwrap();
    assert_eq!(last.date, first.date);
    assert!(last.has_data);
    assert!(!last.day.is_empty());
    for point in &trend.points[..6] {
        assert!(!point.has_data);
        assert!(point.time.is_none());
    }
}

#[tokio::test]
async fn http_rename_to_taken_nickname_conflicts() {
    let server = shared_server().await;
    let client = Client::new();

    let taken = format!("占用{}", unique_suffix());
    register_user(&server, &client, &taken).await;
    let other = register_user(&server, &client, &format!("另一个{}", unique_suffix())).await;

    let response = client
        .post(format!("{}/api/profile/name", server.base_url))
        .bearer_auth(&other.token)
        .json(&serde_json::json!({ "display_name": taken }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn http_invalid_nickname_is_rejected() {
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/register", server.base_url))
        .json(&serde_json::json!({
            "email": format!("u{}@example.com", unique_suffix()),
            "password": "sunrise6",
            "nickname": "bad name!",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_protected_routes_require_a_token() {
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/checkin", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .get(format!("{}/api/trend", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
