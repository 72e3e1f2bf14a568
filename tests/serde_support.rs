//! Serialization of the sync containers behind the `serde` feature

#![cfg(feature = "serde")]

use eddy::error::{ShapeError, ShapeErrors};
use eddy::{Fallible, Optional};

#[test]
fn test_optional_round_trips_through_json() {
    let present = Optional::present(3);
    let json = serde_json::to_string(&present).unwrap();
    assert_eq!(json, r#"{"Present":3}"#);
    assert_eq!(serde_json::from_str::<Optional<i32>>(&json).unwrap(), present);

    let absent: Optional<i32> = serde_json::from_str(r#""Absent""#).unwrap();
    assert_eq!(absent, Optional::absent());
}

#[test]
fn test_fallible_uses_externally_tagged_variants() {
    let failure = Fallible::<i32, String>::failure("bad".to_string());
    assert_eq!(serde_json::to_string(&failure).unwrap(), r#"{"Failure":"bad"}"#);
}

#[test]
fn test_shape_errors_keep_paths() {
    let errors = ShapeErrors::from(ShapeError::at_key("email", "must contain @")).nest("user");
    let json = serde_json::to_string(&errors).unwrap();
    let back: ShapeErrors = serde_json::from_str(&json).unwrap();
    assert_eq!(back.messages(), vec!["[user.email]: must contain @"]);
}
