use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

/// Payload handed to the processing function after a review is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewJob {
    pub resena_id: i64,
    pub texto: String,
    pub pelicula_id: i64,
    pub usuario_id: i64,
}

/// Dispatch seam for the review-processing pipeline. The contract is
/// fire-and-forget: callers log a failed dispatch and move on, so a retrying
/// or queue-backed implementation can be swapped in without touching the
/// review handlers.
#[async_trait]
pub trait ReviewNotifier: Send + Sync {
    async fn dispatch(&self, job: ReviewJob) -> anyhow::Result<()>;
}

/// Direct HTTP POST to the processing function. One round trip, no retry.
pub struct HttpNotifier {
    client: reqwest::Client,
    url: String,
}

impl HttpNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl ReviewNotifier for HttpNotifier {
    async fn dispatch(&self, job: ReviewJob) -> anyhow::Result<()> {
        let res = self
            .client
            .post(&self.url)
            .json(&job)
            .send()
            .await
            .context("processor request failed")?;
        anyhow::ensure!(
            res.status().is_success(),
            "processor responded with {}",
            res.status()
        );
        Ok(())
    }
}

/// Used when no processor endpoint is configured; reviews simply stay
/// unprocessed.
pub struct NoopNotifier;

#[async_trait]
impl ReviewNotifier for NoopNotifier {
    async fn dispatch(&self, job: ReviewJob) -> anyhow::Result<()> {
        debug!(resena_id = job.resena_id, "processor dispatch disabled, skipping");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_serializes_with_wire_field_names() {
        let job = ReviewJob {
            resena_id: 7,
            texto: "Muy buena".into(),
            pelicula_id: 3,
            usuario_id: 1,
        };
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["resena_id"], 7);
        assert_eq!(json["texto"], "Muy buena");
        assert_eq!(json["pelicula_id"], 3);
        assert_eq!(json["usuario_id"], 1);
    }

    #[tokio::test]
    async fn noop_dispatch_always_succeeds() {
        let job = ReviewJob {
            resena_id: 1,
            texto: "x".into(),
            pelicula_id: 1,
            usuario_id: 1,
        };
        assert!(NoopNotifier.dispatch(job).await.is_ok());
    }
}
