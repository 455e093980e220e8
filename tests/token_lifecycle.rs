use compact_token::{decode, decode_as, encode, encode_non_expiring, verify, TokenError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

fn b64_decode(segment: &str) -> Vec<u8> {
    base64::decode_config(segment, base64::URL_SAFE_NO_PAD).unwrap()
}

fn b64_encode(bytes: &[u8]) -> String {
    base64::encode_config(bytes, base64::URL_SAFE_NO_PAD)
}

#[test]
fn issue_verify_decode_scenario() {
    let claims = json!({"a": "b", "c": 1});
    let token = encode(&claims, 3600, "secret").unwrap();

    assert!(verify(&token, "secret").unwrap());
    assert!(!verify(&token, "wrong").unwrap());
    assert_eq!(Value::Object(decode(&token).unwrap()), claims);
}

#[test]
fn nested_claims_round_trip() {
    let claims = json!({
        "sub": "user-42",
        "roles": ["admin", "ops"],
        "profile": {"name": "Ada", "age": 36, "score": 9.5, "active": true},
        "nothing": null,
        "unicode": "héllo ✓"
    });
    let token = encode(&claims, 60, b"k".as_slice()).unwrap();
    assert_eq!(Value::Object(decode(&token).unwrap()), claims);
}

#[test]
fn numbers_keep_their_json_shape() {
    let token = encode(&json!({"int": 1, "float": 1.0}), 60, "s").unwrap();
    let claims = decode(&token).unwrap();
    assert_eq!(claims["int"].as_i64(), Some(1));
    assert_eq!(claims["float"].as_f64(), Some(1.0));
    assert!(claims["float"].as_i64().is_none());
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Grant {
    user: String,
    scopes: Vec<String>,
}

#[test]
fn typed_claims_round_trip() {
    let grant = Grant {
        user: "ada".into(),
        scopes: vec!["read".into(), "write".into()],
    };
    let token = encode(&grant, 60, "s").unwrap();
    assert_eq!(decode_as::<Grant>(&token).unwrap(), grant);
}

#[test]
fn non_object_claims_fail_to_encode() {
    assert!(matches!(
        encode(&vec![1, 2, 3], 60, "s"),
        Err(TokenError::Serialization(_))
    ));
}

#[test]
fn negative_and_zero_ttl_are_already_expired() {
    for ttl in [-1, 0] {
        let token = encode(&json!({"a": 1}), ttl, "s").unwrap();
        assert!(matches!(decode(&token), Err(TokenError::Expired { .. })));
        // Expiry is not the verifier's business.
        assert!(verify(&token, "s").unwrap());
    }
}

#[test]
fn non_expiring_token_decodes() {
    let token = encode_non_expiring(&json!({"a": 1}), "s").unwrap();
    let header = b64_decode(token.split('.').next().unwrap());
    assert_eq!(header, br#"{"alg":"HS256","typ":"JWT"}"#.to_vec());
    assert!(decode(&token).is_ok());
    assert!(verify(&token, "s").unwrap());
}

#[test]
fn malformed_structure_is_reported() {
    assert!(matches!(
        verify("onlyonepart", "s"),
        Err(TokenError::MalformedToken { segments: 1 })
    ));
    assert!(matches!(
        decode("a.b.c.d"),
        Err(TokenError::MalformedToken { segments: 4 })
    ));
    assert!(matches!(
        decode("not.a.validtoken!!"),
        Err(TokenError::Encoding { .. }) | Err(TokenError::Deserialization { .. })
    ));
}

#[test]
fn decode_does_not_check_the_signature() {
    let token = encode(&json!({"role": "user"}), 60, "s").unwrap();
    let mut parts: Vec<String> = token.split('.').map(String::from).collect();
    parts[1] = b64_encode(br#"{"role":"admin"}"#);
    let forged = parts.join(".");

    assert_eq!(decode(&forged).unwrap()["role"], "admin");
    assert!(!verify(&forged, "s").unwrap());
}

#[test]
fn any_payload_bit_flip_breaks_verification() {
    let mut rng = rand::thread_rng();
    let token = encode(&json!({"a": "b", "c": 1, "d": [true, null]}), 3600, "secret").unwrap();
    let parts: Vec<&str> = token.split('.').collect();
    let payload = b64_decode(parts[1]);

    for _ in 0..200 {
        let mut tampered = payload.clone();
        let bit = rng.gen_range(0..tampered.len() * 8);
        tampered[bit / 8] ^= 1 << (bit % 8);
        let forged = format!("{}.{}.{}", parts[0], b64_encode(&tampered), parts[2]);
        assert!(!verify(&forged, "secret").unwrap(), "bit {bit} went unnoticed");
    }
}

#[test]
fn header_tampering_breaks_verification() {
    let token = encode(&json!({"a": 1}), 60, "s").unwrap();
    let parts: Vec<&str> = token.split('.').collect();
    let extended = b64_encode(br#"{"alg":"HS256","typ":"JWT","exp":"2999-01-01 00:00:00"}"#);
    let forged = format!("{}.{}.{}", extended, parts[1], parts[2]);
    assert!(!verify(&forged, "s").unwrap());
}

#[test]
fn random_wrong_secrets_are_rejected() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let good: [u8; 32] = rng.gen();
        let mut bad = good;
        bad[rng.gen_range(0..32)] ^= 0x01;

        let token = encode(&json!({"n": rng.gen::<u32>()}), 60, good).unwrap();
        assert!(verify(&token, good).unwrap());
        assert!(!verify(&token, bad).unwrap());
    }
}

#[test]
fn stripped_or_truncated_signature_is_rejected() {
    let token = encode(&json!({"a": 1}), 60, "s").unwrap();
    let (unsigned, signature) = token.rsplit_once('.').unwrap();
    assert!(!verify(&format!("{}.", unsigned), "s").unwrap());
    assert!(!verify(&format!("{}.{}", unsigned, &signature[..20]), "s").unwrap());
    assert!(!verify(&format!("{}.{}A", unsigned, signature), "s").unwrap());
}

#[test]
fn padded_signature_is_rejected() {
    let token = encode(&json!({"a": "b"}), 3600, "secret").unwrap();
    assert!(verify(&token, "secret").unwrap());
    assert!(!verify(&format!("{token}="), "secret").unwrap());
    assert!(!verify(&format!("{token}=="), "secret").unwrap());
}

#[test]
fn padded_payload_fails_to_decode() {
    let token = encode(&json!({"ok": 1}), 3600, "secret").unwrap();
    let parts: Vec<&str> = token.split('.').collect();
    let padded = format!("{}.{}==.{}", parts[0], parts[1], parts[2]);
    assert!(matches!(
        decode(&padded),
        Err(TokenError::Encoding { .. })
    ));
    assert!(!verify(&padded, "secret").unwrap());
}
