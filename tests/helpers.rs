/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// Routing table for the local test listener: (path fragment, status line,
// body). The first fragment contained in the request wins; an empty fragment
// matches everything.
pub(crate) type Routes = &'static [(&'static str, &'static str, &'static str)];

// Serves canned HTTP responses on a loopback port until the runtime shuts
// down. Good enough for exercising the transport without a live API.
#[allow(dead_code)]
pub(crate) async fn spawn_server(routes: Routes) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let n = stream.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).into_owned();
                let (status_line, body) = routes
                    .iter()
                    .find(|(fragment, _, _)| request.contains(fragment))
                    .map(|(_, status_line, body)| (*status_line, *body))
                    .unwrap_or(("HTTP/1.1 404 Not Found", "{}"));
                let response = format!(
                    "{status_line}\r\nContent-Type: application/json\r\nRetry-After: 7\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });
    Ok(addr)
}

// Retrieves the Backlot keys for live-API tests.
#[allow(dead_code)]
pub(crate) fn get_backlot_keys() -> anyhow::Result<(String, String)> {
    Ok((
        std::env::var("OOYALA_API_KEY")?,
        std::env::var("OOYALA_SECRET_KEY")?,
    ))
}
