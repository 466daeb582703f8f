//! Publishing export documents to S3.

use anyhow::{Context, Result};

use crate::passenger::DateKey;

/// Object key the itinerary is stored under: `itineraries/<first>_<last>.json`,
/// or `itineraries/empty.json` when the plan covers no days. Gzipped uploads
/// get a `.gz` suffix.
pub fn itinerary_key(first: Option<DateKey>, last: Option<DateKey>, gzip: bool) -> String {
    let key = match (first, last) {
        (Some(first), Some(last)) => format!("itineraries/{first}_{last}.json"),
        _ => "itineraries/empty.json".to_string(),
    };
    if gzip { format!("{key}.gz") } else { key }
}

/// Uploads an exported JSON file to an S3 bucket as-is. When `gzip` is set
/// the file is expected to be gzip-compressed already and is tagged with a
/// `gzip` content encoding.
#[tracing::instrument(skip(client))]
pub async fn upload_json_file(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    path: &str,
    gzip: bool,
) -> Result<()> {
    let body = std::fs::read(path).with_context(|| format!("reading '{path}'"))?;
    let size = body.len();

    let mut request = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(body.into())
        .content_type("application/json");
    if gzip {
        request = request.content_encoding("gzip");
    }

    request
        .send()
        .await
        .with_context(|| format!("uploading s3://{bucket}/{key}"))?;

    tracing::info!(bucket, key, bytes = size, "Uploaded to S3");
    Ok(())
}
