use anyhow::Context;
use async_trait::async_trait;
use aws_config::{defaults, BehaviorVersion};
use aws_credential_types::Credentials;
use aws_sdk_s3::{
    config::{Builder as S3ConfigBuilder, Region},
    types::BucketCannedAcl,
    Client,
};
use aws_smithy_types::byte_stream::ByteStream;
use bytes::Bytes;

use crate::config::StorageConfig;

/// Blob store seam used by the review processor. Blobs land in a single
/// public container and are addressed by their plain URL afterward.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Create the container if it does not exist yet.
    async fn ensure_container(&self) -> anyhow::Result<()>;

    /// Upload a text blob and return its public URL.
    async fn put_text(&self, name: &str, body: Bytes) -> anyhow::Result<String>;
}

#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    endpoint: String,
    container: String,
}

impl S3Storage {
    pub async fn new(cfg: &StorageConfig) -> anyhow::Result<Self> {
        let shared = defaults(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .credentials_provider(Credentials::new(
                cfg.access_key.clone(),
                cfg.secret_key.clone(),
                None,
                None,
                "static",
            ))
            .endpoint_url(&cfg.endpoint)
            .load()
            .await;

        let conf = S3ConfigBuilder::from(&shared)
            .endpoint_url(&cfg.endpoint)
            .force_path_style(true)
            .build();

        Ok(Self {
            client: Client::from_conf(conf),
            endpoint: cfg.endpoint.trim_end_matches('/').to_string(),
            container: cfg.container.clone(),
        })
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.container, name)
    }
}

#[async_trait]
impl BlobStorage for S3Storage {
    async fn ensure_container(&self) -> anyhow::Result<()> {
        // Blobs are addressed by plain URL, so the container is public-read.
        let res = self
            .client
            .create_bucket()
            .bucket(&self.container)
            .acl(BucketCannedAcl::PublicRead)
            .send()
            .await;
        match res {
            Ok(_) => Ok(()),
            Err(e) => {
                let svc = e.into_service_error();
                if svc.is_bucket_already_owned_by_you() || svc.is_bucket_already_exists() {
                    Ok(())
                } else {
                    Err(anyhow::Error::new(svc)).context("s3 create_bucket")
                }
            }
        }
    }

    async fn put_text(&self, name: &str, body: Bytes) -> anyhow::Result<String> {
        self.client
            .put_object()
            .bucket(&self.container)
            .key(name)
            .body(ByteStream::from(body))
            .content_type("text/plain; charset=utf-8")
            .send()
            .await
            .context("s3 put_object")?;
        Ok(self.public_url(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn public_url_is_path_style() {
        let storage = S3Storage::new(&StorageConfig {
            endpoint: "http://localhost:9000/".into(),
            container: "resenas".into(),
            access_key: "minio".into(),
            secret_key: "minio123".into(),
            region: "us-east-1".into(),
        })
        .await
        .expect("build storage");

        assert_eq!(
            storage.public_url("resena_7_123.txt"),
            "http://localhost:9000/resenas/resena_7_123.txt"
        );
    }
}
