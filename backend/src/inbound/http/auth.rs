//! Authentication helpers used by HTTP handlers.
//!
//! Concentrates credential checks and user identity derivation so the
//! HTTP modules stay focused on request/response mapping. Credentials are
//! a development fixture; a real deployment swaps this for an identity
//! provider behind the same signature.

use serde_json::json;

use crate::domain::{Error, UserId};

use super::ApiResult;

/// Validate credentials and derive the acting user id.
pub fn authenticate(username: &str, password: &str) -> ApiResult<UserId> {
    if username.trim().is_empty() {
        return Err(Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })));
    }
    if password.trim().is_empty() {
        return Err(Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })));
    }
    if password != "password" {
        return Err(Error::unauthorized("invalid credentials"));
    }
    UserId::new(format!("user-{username}"))
        .map_err(|err| Error::internal(format!("invalid derived user id: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use rstest_bdd_macros::{given, then, when};

    #[given("valid credentials")]
    fn valid_credentials() -> (&'static str, &'static str) {
        ("ada", "password")
    }

    #[given("a wrong password")]
    fn wrong_password() -> (&'static str, &'static str) {
        ("ada", "hunter2")
    }

    #[when("authentication runs")]
    fn authentication_runs(credentials: (&str, &str)) -> ApiResult<UserId> {
        authenticate(credentials.0, credentials.1)
    }

    #[then("a user id is derived from the username")]
    fn a_user_id_is_derived(result: ApiResult<UserId>) {
        let id = result.expect("expected authentication success");
        assert_eq!(id.as_ref(), "user-ada");
    }

    #[then("an unauthorised error is returned")]
    fn an_unauthorised_error_is_returned(result: ApiResult<UserId>) {
        let error = result.expect_err("should be an error");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn authentication_happy_path() {
        let credentials = valid_credentials();
        let result = authentication_runs(credentials);
        a_user_id_is_derived(result);
    }

    #[rstest]
    fn authentication_unhappy_path() {
        let credentials = wrong_password();
        let result = authentication_runs(credentials);
        an_unauthorised_error_is_returned(result);
    }

    #[rstest]
    #[case("", "password", "username")]
    #[case("ada", "", "password")]
    fn blank_fields_are_invalid_requests(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let error = authenticate(username, password).expect_err("invalid request");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().and_then(|v| v.as_object()).expect("details");
        assert_eq!(details.get("field").and_then(|v| v.as_str()), Some(field));
    }
}
