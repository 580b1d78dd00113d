//! End-to-end properties of the signing pipeline.

use fcb2b_auth::{AuthError, ParameterSet, RequestDescription, canonicalize, sign, sign_request};
use fcb2b_core::{ApiKey, SecretKey, SigningConfig};
use percent_encoding::percent_decode_str;

const HOST: &str = "example.com";
const PATH: &str = "/svc/Check";
const SECRET: &str = "yoursecretkey";

fn sample_params() -> Vec<(&'static str, &'static str)> {
    vec![
        ("apiKey", "anonymous"),
        ("TimeStamp", "2024-01-01T00:00:00Z"),
        ("GlobalIdentifier", "11111111-1111-1111-1111-111111111111"),
        ("SupplierItemSKU", "ABC 123"),
    ]
}

fn request_with(params: &[(&str, &str)]) -> RequestDescription {
    params
        .iter()
        .fold(RequestDescription::new(HOST, PATH), |req, (k, v)| {
            req.with_param(*k, *v)
        })
}

fn config_with(secret: &str) -> SigningConfig {
    SigningConfig::new(ApiKey::default(), SecretKey::from(secret))
}

fn signature_of(url: &str) -> &str {
    url.rsplit_once("&Signature=").map(|(_, sig)| sig).unwrap()
}

#[test]
fn test_should_match_golden_vector() {
    let signed = sign_request(&request_with(&sample_params()), &config_with(SECRET)).unwrap();

    assert_eq!(
        signed.canonical.query,
        "GlobalIdentifier=11111111-1111-1111-1111-111111111111\
         &SupplierItemSKU=ABC%20123\
         &TimeStamp=2024-01-01T00%3A00%3A00Z\
         &apiKey=anonymous"
    );
    assert_eq!(
        signed.canonical.string_to_sign,
        format!("GET\n{HOST}\n{PATH}\n{}", signed.canonical.query)
    );
    assert_eq!(
        signature_of(&signed.url),
        "YLks0dmcJL8q%2BAQITjHybXceQz%2Bp2NcU1Un25HMzzCU%3D"
    );
}

#[test]
fn test_should_produce_identical_urls_for_identical_inputs() {
    let request = request_with(&sample_params());
    let config = config_with(SECRET);
    let first = sign_request(&request, &config).unwrap();
    for _ in 0..10 {
        assert_eq!(sign_request(&request, &config).unwrap(), first);
    }
}

#[test]
fn test_should_order_parameters_independent_of_insertion() {
    let mut reversed = sample_params();
    reversed.reverse();
    let config = config_with(SECRET);
    assert_eq!(
        sign_request(&request_with(&sample_params()), &config).unwrap(),
        sign_request(&request_with(&reversed), &config).unwrap()
    );
}

#[test]
fn test_should_list_parameters_in_bytewise_name_order() {
    let params: ParameterSet = [("b", "1"), ("A", "2"), ("a", "3"), ("_x", "4"), ("Z", "5")]
        .into_iter()
        .collect();
    let canonical = canonicalize(HOST, PATH, &params).unwrap();
    let names: Vec<&str> = canonical
        .query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap().0)
        .collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert_eq!(names, vec!["A", "Z", "_x", "a", "b"]);
}

#[test]
fn test_should_recover_values_by_percent_decoding() {
    let values = [" leading space", "a&b", "k=v", "50%", "naïve café", "東京", "+/="];
    let params: ParameterSet = values
        .iter()
        .enumerate()
        .map(|(i, v)| (format!("p{i}"), (*v).to_owned()))
        .collect();
    let canonical = canonicalize(HOST, PATH, &params).unwrap();

    for pair in canonical.query.split('&') {
        let (name, encoded) = pair.split_once('=').unwrap();
        let decoded = percent_decode_str(encoded).decode_utf8().unwrap();
        assert_eq!(params.get(name), Some(decoded.as_ref()));
    }
}

#[test]
fn test_should_change_signature_for_any_single_perturbation() {
    let config = config_with(SECRET);
    let baseline = sign_request(&request_with(&sample_params()), &config).unwrap();
    let baseline_sig = signature_of(&baseline.url).to_owned();

    let mut variants = Vec::new();
    variants.push(sign_request(
        &RequestDescription::new("example.org", PATH)
            .with_param("apiKey", "anonymous")
            .with_param("TimeStamp", "2024-01-01T00:00:00Z")
            .with_param("GlobalIdentifier", "11111111-1111-1111-1111-111111111111")
            .with_param("SupplierItemSKU", "ABC 123"),
        &config,
    ));
    variants.push(sign_request(
        &RequestDescription::new(HOST, "/svc/ChecK")
            .with_param("apiKey", "anonymous")
            .with_param("TimeStamp", "2024-01-01T00:00:00Z")
            .with_param("GlobalIdentifier", "11111111-1111-1111-1111-111111111111")
            .with_param("SupplierItemSKU", "ABC 123"),
        &config,
    ));
    variants.push(sign_request(
        &request_with(&sample_params()).with_param("SupplierItemSKU", "ABC 124"),
        &config,
    ));
    variants.push(sign_request(
        &request_with(&sample_params()).with_param("TimeStamp", "2024-01-01T00:00:01Z"),
        &config,
    ));
    let mut renamed = request_with(&sample_params());
    renamed.params_mut().remove("apiKey");
    variants.push(sign_request(
        &renamed.with_param("apikey", "anonymous"),
        &config,
    ));
    variants.push(sign_request(
        &request_with(&sample_params()),
        &config_with("yoursecretkez"),
    ));

    for variant in variants {
        let variant = variant.unwrap();
        assert_ne!(signature_of(&variant.url), baseline_sig);
    }
}

#[test]
fn test_should_never_leave_base64_specials_unescaped() {
    let config = config_with(SECRET);
    for i in 0..64 {
        let sku = format!("SKU-{i}");
        let signed = sign_request(
            &request_with(&sample_params()).with_param("SupplierItemSKU", sku),
            &config,
        )
        .unwrap();
        let signature = signature_of(&signed.url);
        assert!(!signature.contains(['+', '/', '=']), "{signature}");
    }
}

#[test]
fn test_should_sign_concurrently() {
    let request = request_with(&sample_params());
    let config = config_with(SECRET);
    let expected = sign_request(&request, &config).unwrap();
    let (request, config) = (&request, &config);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(move || sign_request(request, config).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_should_surface_stage_specific_errors() {
    let config = config_with(SECRET);
    assert!(matches!(
        sign_request(&RequestDescription::new("", PATH), &config),
        Err(AuthError::InvalidParameter(_))
    ));
    assert!(matches!(
        sign_request(&request_with(&sample_params()), &SigningConfig::default()),
        Err(AuthError::Signing(_))
    ));
    assert!(matches!(
        sign("GET\nexample.com\n/svc\n", &SecretKey::default()),
        Err(AuthError::Signing(_))
    ));
}

#[test]
fn test_should_keep_secret_out_of_errors() {
    let request = RequestDescription::new(HOST, "no-leading-slash").with_param("a", "1");
    let err = sign_request(&request, &config_with(SECRET)).unwrap_err();
    assert!(!err.to_string().contains(SECRET));
    assert!(!format!("{err:?}").contains(SECRET));
}
