#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

//Claims stored for a session id. Sessions are created by the login service; this service only reads them.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct SessionClaims {
    pub UserId: i64,
    pub Username: String
}

//Accepts both "Bearer <id>" and a bare session id in the Authorization header.
pub fn parseSessionId(authHeader: &str) -> Option<&str> {
    let value = authHeader.trim();
    let sessionId = match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        Some(_) => return None,
        None => value
    };

    if sessionId.is_empty() {
        return None;
    }
    return Some(sessionId);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer 9F3A", Some("9F3A"))]
    #[case("bearer   9F3A ", Some("9F3A"))]
    #[case("9F3A", Some("9F3A"))]
    #[case("Basic dXNlcjpwd2Q=", None)]
    #[case("Bearer ", None)]
    #[case("", None)]
    fn parses_authorization_header(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(parseSessionId(header), expected);
    }

    #[test]
    fn claims_round_trip_through_json() {
        let claims: SessionClaims = serde_json::from_str(r#"{"UserId":7,"Username":"clerk"}"#).unwrap();
        assert_eq!(claims, SessionClaims { UserId: 7, Username: "clerk".into() });
    }
}
