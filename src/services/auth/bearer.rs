use axum::http::{HeaderMap, header};

use crate::error::AuthError;

/// Pull the bearer token out of the `Authorization` header.
///
/// The header must be exactly `Bearer <token>`: two parts separated by a
/// single space, scheme matched case-sensitively. The token part is returned
/// verbatim, with no trimming or decoding.
pub fn extract(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::HeaderMissing)?;
    let value = value.to_str().map_err(|_| AuthError::HeaderMalformed)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::HeaderMalformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn absent_header_is_missing() {
        assert_eq!(extract(&HeaderMap::new()), Err(AuthError::HeaderMissing));
    }

    #[test]
    fn token_is_returned_verbatim() {
        assert_eq!(extract(&headers_with("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
    }

    #[test]
    fn scheme_is_case_sensitive() {
        assert_eq!(
            extract(&headers_with("bearer abc.def.ghi")),
            Err(AuthError::HeaderMalformed)
        );
    }

    #[test]
    fn wrong_scheme_is_malformed() {
        assert_eq!(
            extract(&headers_with("Token abc.def.ghi")),
            Err(AuthError::HeaderMalformed)
        );
    }

    #[test]
    fn scheme_alone_is_malformed() {
        assert_eq!(extract(&headers_with("Bearer")), Err(AuthError::HeaderMalformed));
    }

    #[test]
    fn empty_token_is_malformed() {
        assert_eq!(extract(&headers_with("Bearer ")), Err(AuthError::HeaderMalformed));
    }

    #[test]
    fn three_parts_are_malformed() {
        assert_eq!(
            extract(&headers_with("Bearer abc def")),
            Err(AuthError::HeaderMalformed)
        );
    }

    #[test]
    fn non_ascii_header_value_is_malformed() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xc3\xa9").unwrap(),
        );
        assert_eq!(extract(&headers), Err(AuthError::HeaderMalformed));
    }
}
