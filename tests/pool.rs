#[cfg(test)]
mod tests {
    use camwatch::api::client::CameraClient;
    use camwatch::api::models::Camera;
    use camwatch::libs::analyzer::ArchiveReport;
    use camwatch::libs::config::{ApiConfig, ReportConfig};
    use camwatch::libs::pool::{analyze_fleet, fetch_fragments_with_retry, CancelToken};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn camera(uid: &str) -> Camera {
        Camera {
            uid: uid.to_string(),
            name: None,
            sn: None,
            vendor: None,
            model: None,
            address: None,
            is_online: true,
            offline_since: None,
            data_center: None,
            memory_card_state: None,
        }
    }

    /// Minimal fragment endpoint: requests for the camera named "flaky"
    /// always fail with a 500, everything else gets one valid fragment.
    async fn serve_fragments(listener: TcpListener, now: i64) {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let mut read = 0;
                loop {
                    match socket.read(&mut buf[read..]).await {
                        Ok(0) => break,
                        Ok(n) => {
                            read += n;
                            if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") || read == buf.len() {
                                break;
                            }
                        }
                        Err(_) => return,
                    }
                }
                let request = String::from_utf8_lossy(&buf[..read]);
                let response = if request.contains("/cameras/flaky/") {
                    "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                        .to_string()
                } else {
                    let body = format!(r#"{{"fragments":[{{"since":{},"till":{}}}]}}"#, now - 3600, now);
                    format!(
                        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    )
                };
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    }

    #[test]
    fn test_token_starts_uncancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancellation_is_visible_to_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_resolves_immediately_when_already_set() {
        let token = CancelToken::new();
        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .expect("already-cancelled token must not block");
    }

    #[tokio::test]
    async fn test_cancelled_wakes_waiting_task() {
        let token = CancelToken::new();
        let waiter = token.clone();
        let handle = tokio::spawn(async move { waiter.cancelled().await });

        tokio::task::yield_now().await;
        token.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("waiter must wake after cancel")
            .unwrap();
    }

    #[tokio::test]
    async fn test_fetch_skipped_when_cancelled_before_first_attempt() {
        let client = CameraClient::new(&ApiConfig::default()).unwrap();
        let token = CancelToken::new();
        token.cancel();

        // No network call happens: a cancelled token short-circuits to an
        // empty fragment list.
        let fragments = fetch_fragments_with_retry(&client, &token, "cam-1", 0, 100, &ReportConfig::default())
            .await
            .unwrap();
        assert!(fragments.is_empty());
    }

    #[tokio::test]
    async fn test_exhausted_retries_yield_zero_metric_entry_in_input_order() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let now = 1_700_000_000i64;
        tokio::spawn(serve_fragments(listener, now));

        let api = ApiConfig {
            base_url: format!("http://{}", addr),
            ..ApiConfig::default()
        };
        let client = Arc::new(CameraClient::new(&api).unwrap());
        let config = ReportConfig {
            period_days: 1,
            workers: 2,
            max_retries: 2,
            retry_delay_secs: 0,
            ..ReportConfig::default()
        };

        let cameras = vec![camera("flaky"), camera("steady")];
        let outcome = analyze_fleet(client, cameras, now, &config, CancelToken::new()).await;

        assert!(!outcome.cancelled);
        assert_eq!(outcome.errors, 1);
        assert_eq!(outcome.results.len(), 2);

        // Results come back in input camera order, failures included.
        let failed = &outcome.results[0];
        assert_eq!(failed.camera.uid, "flaky");
        assert!(failed.fetch_error.is_some());
        assert_eq!(failed.report, ArchiveReport::empty());

        let ok = &outcome.results[1];
        assert_eq!(ok.camera.uid, "steady");
        assert!(ok.fetch_error.is_none());
        assert_eq!(ok.report.total_fragments, 1);
        assert_eq!(ok.report.total_recorded, 3600);
        assert_eq!(ok.report.coverage_pct, 100.0);
    }
}
