/*!
 * Common test utilities for the babelcache test suite
 */

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use babelcache::database::{MemoryStore, Repository};
use babelcache::providers::mock::MockProvider;
use babelcache::providers::{ProviderChain, TranslationProvider};
use babelcache::TranslationService;

/// Route library logs to the test output once per process
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Provider chain made of mock providers, in the given order
pub fn mock_chain(providers: &[MockProvider]) -> ProviderChain {
    providers
        .iter()
        .cloned()
        .map(|p| Arc::new(p) as Arc<dyn TranslationProvider>)
        .collect()
}

/// Service over mocks with in-memory history
pub fn memory_service(providers: &[MockProvider]) -> TranslationService {
    init_logging();
    TranslationService::new(mock_chain(providers), Arc::new(MemoryStore::new()))
}

/// Service over mocks with history in a SQLite file inside `dir`
pub fn sqlite_service(providers: &[MockProvider], dir: &tempfile::TempDir) -> TranslationService {
    init_logging();
    let db = babelcache::database::DatabaseConnection::new(dir.path().join("history.db"))
        .expect("Failed to open test database");
    TranslationService::new(mock_chain(providers), Arc::new(Repository::new(db)))
}

/// How the local HTTP server answers
#[derive(Debug, Clone)]
enum Reply {
    Canned { status: u16, body: String },
    Silent,
}

/// Minimal HTTP/1.1 server on localhost for provider tests
pub struct TestServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Answer every request with `status` and a JSON `body`
    pub async fn respond(status: u16, body: &str) -> Self {
        Self::start(Reply::Canned {
            status,
            body: body.to_string(),
        })
        .await
    }

    /// Accept connections and read requests but never answer
    pub async fn silent() -> Self {
        Self::start(Reply::Silent).await
    }

    async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("No local address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        let handle = tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let reply = reply.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 8192];
                    let mut read = 0;
                    while read < buf.len() {
                        match socket.read(&mut buf[read..]).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => read += n,
                        }
                        if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }

                    let request = String::from_utf8_lossy(&buf[..read]).to_string();
                    if let Some(line) = request.lines().next() {
                        recorded.lock().push(line.to_string());
                    }

                    match reply {
                        Reply::Canned { status, body } => {
                            let response = format!(
                                "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                                status,
                                body.len(),
                                body
                            );
                            let _ = socket.write_all(response.as_bytes()).await;
                            let _ = socket.shutdown().await;
                        }
                        Reply::Silent => {
                            tokio::time::sleep(Duration::from_secs(30)).await;
                        }
                    }
                });
            }
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    /// Base URL, without trailing slash
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request lines received so far, e.g. `GET /get?q=Hello HTTP/1.1`
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
