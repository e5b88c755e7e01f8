//! Fetching and decoding of both sources.

use crate::backend::{Parameter, ParameterSource, SecretSource};
use crate::format::EnvValue;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Fetches a secret and flattens its JSON body into key/value pairs.
///
/// Keys keep the order they have in the secret body.
///
/// # Errors
///
/// - [`Error::Service`]: the request failed
/// - [`Error::MalformedSecret`]: the body is not valid JSON
pub async fn fetch_secret(
    source: &dyn SecretSource,
    id: &str,
) -> Result<Vec<(String, EnvValue)>> {
    let payload = source.get_secret_value(id).await?;
    debug!(source = source.name(), response = %echo(&payload), "secret store response");

    parse_secret_string(payload.secret_string.as_deref())
}

/// Decodes a secret string into key/value pairs.
///
/// A JSON object yields its entries. Arrays and strings yield one pair per
/// element or character, keyed by index (`0`, `1`, ...). A missing or empty
/// body, `null`, booleans and numbers yield no pairs.
pub fn parse_secret_string(body: Option<&str>) -> Result<Vec<(String, EnvValue)>> {
    let body = match body {
        Some(b) if !b.is_empty() => b,
        _ => return Ok(Vec::new()),
    };

    let parsed: Value = serde_json::from_str(body).map_err(|source| Error::MalformedSecret {
        body: body.to_string(),
        source,
    })?;

    let pairs = match parsed {
        Value::Object(map) => map.into_iter().map(|(k, v)| (k, EnvValue::from(v))).collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), EnvValue::from(v)))
            .collect(),
        Value::String(s) => s
            .chars()
            .enumerate()
            .map(|(i, c)| (i.to_string(), EnvValue::Text(c.to_string())))
            .collect(),
        Value::Null | Value::Bool(_) | Value::Number(_) => Vec::new(),
    };

    Ok(pairs)
}

/// Fetches every parameter under `path`, following continuation tokens.
///
/// Pages are requested strictly one after another and merged in order; the
/// function resolves only after the last page has been received. A failure
/// on any page fails the whole fetch.
///
/// # Errors
///
/// - [`Error::Service`]: a page request failed
/// - [`Error::RepeatedPageToken`]: the service handed back a continuation
///   token it had already returned
pub async fn fetch_parameters_recursive(
    source: &dyn ParameterSource,
    path: &str,
) -> Result<Vec<Parameter>> {
    let mut parameters = Vec::new();
    let mut next_token: Option<String> = None;
    let mut seen_tokens = HashSet::new();
    let mut page_number = 1usize;

    loop {
        let page = source.get_parameters_by_path(path, next_token.take()).await?;
        debug!(
            source = source.name(),
            page_number,
            response = %echo(&page),
            "parameter store response"
        );

        parameters.extend(page.parameters);

        // Check for more results
        next_token = match page.next_token.filter(|t| !t.is_empty()) {
            Some(token) if !seen_tokens.insert(token.clone()) => {
                return Err(Error::RepeatedPageToken {
                    path: path.to_string(),
                    token,
                });
            }
            Some(token) => Some(token),
            None => break,
        };
        page_number += 1;
    }

    Ok(parameters)
}

/// Renders a response as compact JSON for the debug log.
fn echo(response: &impl Serialize) -> String {
    serde_json::to_string(response).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ParameterPage, SecretPayload};
    use crate::backends::mock::MockBackend;
    use serde_json::json;

    #[test]
    fn test_parse_object() {
        let pairs = parse_secret_string(Some(r#"{"B":"1","A":2,"C":true}"#)).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("B".to_string(), EnvValue::from("1")),
                ("A".to_string(), EnvValue::Number(2.into())),
                ("C".to_string(), EnvValue::from(json!(true))),
            ]
        );
    }

    #[test]
    fn test_parse_empty_bodies() {
        assert!(parse_secret_string(None).unwrap().is_empty());
        assert!(parse_secret_string(Some("")).unwrap().is_empty());
        assert!(parse_secret_string(Some("null")).unwrap().is_empty());
        assert!(parse_secret_string(Some("{}")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse_secret_string(Some("plain text secret")).unwrap_err();
        match err {
            Error::MalformedSecret { body, .. } => assert_eq!(body, "plain text secret"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_scalars_yield_nothing() {
        for body in ["false", "true", "0", "5", "-1.5", "\"\""] {
            let pairs = parse_secret_string(Some(body)).unwrap();
            assert!(pairs.is_empty(), "{body} produced {pairs:?}");
        }
    }

    #[test]
    fn test_parse_array_keys_by_index() {
        let pairs = parse_secret_string(Some(r#"["a",2,null]"#)).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("0".to_string(), EnvValue::from("a")),
                ("1".to_string(), EnvValue::Number(2.into())),
                ("2".to_string(), EnvValue::from(json!(null))),
            ]
        );
    }

    #[test]
    fn test_parse_string_keys_by_index() {
        let pairs = parse_secret_string(Some(r#""ok""#)).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("0".to_string(), EnvValue::from("o")),
                ("1".to_string(), EnvValue::from("k")),
            ]
        );
    }

    #[test]
    fn test_echo_uses_service_field_names() {
        let page = ParameterPage {
            parameters: vec![Parameter::new("/app/A", "1")],
            next_token: None,
        };
        assert_eq!(echo(&page), r#"{"Parameters":[{"Name":"/app/A","Value":"1"}]}"#);
        assert_eq!(
            echo(&SecretPayload::with_string("{}")),
            r#"{"SecretString":"{}"}"#
        );
    }

    #[tokio::test]
    async fn test_fetch_secret() {
        let backend = MockBackend::new();
        backend.set_secret("/app/x", r#"{"A":"1"}"#).await;

        let pairs = fetch_secret(&backend, "/app/x").await.unwrap();
        assert_eq!(pairs, vec![("A".to_string(), EnvValue::from("1"))]);
        assert_eq!(backend.secret_calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_secret_without_string() {
        let backend = MockBackend::new();
        backend.set_payload("/app/bin", Default::default()).await;

        let pairs = fetch_secret(&backend, "/app/bin").await.unwrap();
        assert!(pairs.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_secret_not_found() {
        let backend = MockBackend::new();
        let result = fetch_secret(&backend, "/missing").await;
        assert!(matches!(result, Err(Error::Service { .. })));
    }

    #[tokio::test]
    async fn test_fetch_parameters_follows_every_page() {
        let backend = MockBackend::new().with_page_size(10);
        let params: Vec<Parameter> = (0..25)
            .map(|i| Parameter::new(format!("/app/y/KEY_{i:02}"), i.to_string()))
            .collect();
        backend.set_parameters("/app/y/", params.clone()).await;

        let fetched = fetch_parameters_recursive(&backend, "/app/y/").await.unwrap();

        assert_eq!(fetched, params);
        assert_eq!(backend.parameter_calls(), 3);
    }

    #[tokio::test]
    async fn test_fetch_parameters_empty_path() {
        let backend = MockBackend::new();
        let fetched = fetch_parameters_recursive(&backend, "/nothing/").await.unwrap();
        assert!(fetched.is_empty());
        assert_eq!(backend.parameter_calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_token_ends_pagination() {
        let backend = MockBackend::new();
        backend
            .set_pages(
                "/app/",
                vec![ParameterPage {
                    parameters: vec![Parameter::new("/app/A", "1")],
                    next_token: Some(String::new()),
                }],
            )
            .await;

        let fetched = fetch_parameters_recursive(&backend, "/app/").await.unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(backend.parameter_calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_parameters_error_mid_way() {
        let mut backend = MockBackend::new().with_page_size(1);
        backend
            .set_parameters(
                "/app/",
                vec![Parameter::new("/app/A", "1"), Parameter::new("/app/B", "2")],
            )
            .await;
        backend.fail_parameters_after = Some(1);

        let result = fetch_parameters_recursive(&backend, "/app/").await;
        assert!(result.is_err());
        assert_eq!(backend.parameter_calls(), 2);
    }

    #[tokio::test]
    async fn test_repeated_token_stops_pagination() {
        let backend = MockBackend::new();
        backend
            .set_pages(
                "/loop/",
                vec![
                    ParameterPage {
                        parameters: vec![Parameter::new("/loop/A", "1")],
                        next_token: Some("again".to_string()),
                    },
                    ParameterPage {
                        parameters: vec![Parameter::new("/loop/B", "2")],
                        next_token: Some("again".to_string()),
                    },
                ],
            )
            .await;

        let err = fetch_parameters_recursive(&backend, "/loop/").await.unwrap_err();
        match err {
            Error::RepeatedPageToken { path, token } => {
                assert_eq!(path, "/loop/");
                assert_eq!(token, "again");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(backend.parameter_calls(), 2);
    }
}
