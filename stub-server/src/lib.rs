//! Local stand-in for the detection and advice endpoints.

pub mod model;
pub mod routes;
pub mod state;

pub use routes::configure_routes;
pub use state::{StubScript, StubState};

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use std::net::SocketAddr;

/// A stub server running on the current actix system.
pub struct RunningStub {
    pub addr: SocketAddr,
    handle: ServerHandle,
    state: web::Data<StubState>,
}

impl RunningStub {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn predict_calls(&self) -> usize {
        self.state.predict_calls()
    }

    pub fn advice_calls(&self) -> usize {
        self.state.advice_calls()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

/// Binds an ephemeral port on 127.0.0.1 and serves `script` until stopped.
pub fn spawn(script: StubScript) -> std::io::Result<RunningStub> {
    let state = web::Data::new(StubState::new(script));
    let app_state = state.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(configure_routes)
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))?;

    let addr = server
        .addrs()
        .first()
        .copied()
        .ok_or_else(|| std::io::Error::other("stub server bound no address"))?;
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    log::info!("Stub server listening on {}", addr);
    Ok(RunningStub {
        addr,
        handle,
        state,
    })
}
