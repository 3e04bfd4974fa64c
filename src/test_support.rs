use axum::Router;
use tokio::net::TcpListener;

use crate::client::SiteClient;

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Client whose origin is `base` and whose tag list lives at `{base}/tags`.
pub fn client_for(base: &str) -> SiteClient {
    SiteClient::new(base, format!("{base}/tags")).unwrap()
}
