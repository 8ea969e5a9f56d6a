//! Resolution-chain behaviour: priority, short-circuiting and the
//! never-fabricate guarantee.

use std::sync::atomic::Ordering;
use std::time::Duration;

use cin_resolver::fakes::ScriptedSource;
use cin_resolver::{
    CinError, CompanyResolver, KnownCompanies, KycClient, KycConfig, RegistryConfig,
    RegistryPortalClient, ResolutionSource,
};

const TECHLIFY: &str = "U72900PN2022PTC211370";
const UNKNOWN: &str = "U74999DL2015PTC123456";

#[tokio::test]
async fn known_cin_skips_network_sources() {
    let kyc = ScriptedSource::answering("kyc_api", "Should Not Be Used Pvt Ltd");
    let registry = ScriptedSource::answering("registry_portal", "Nor This Pvt Ltd");
    let kyc_calls = kyc.counter();
    let registry_calls = registry.counter();

    let resolver = CompanyResolver::new()
        .with_source(KnownCompanies::builtin())
        .with_source(kyc)
        .with_source(registry);

    let record = resolver.resolve(TECHLIFY).await.unwrap();

    assert_eq!(
        record.company_name.as_deref(),
        Some("Techlify Solutions Private Limited")
    );
    assert_eq!(record.source, ResolutionSource::KnownTable);
    assert_eq!(kyc_calls.load(Ordering::SeqCst), 0);
    assert_eq!(registry_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failing_sources_yield_null_name() {
    let kyc = ScriptedSource::failing("kyc_api", "connection reset");
    let registry = ScriptedSource::empty("registry_portal");
    let kyc_calls = kyc.counter();
    let registry_calls = registry.counter();

    let resolver = CompanyResolver::new()
        .with_source(KnownCompanies::builtin())
        .with_source(kyc)
        .with_source(registry);

    let record = resolver.resolve(UNKNOWN).await.unwrap();

    assert_eq!(record.company_name, None);
    assert_eq!(record.source, ResolutionSource::Unresolved);
    assert_eq!(record.state, "Delhi");
    assert_eq!(record.country, "India");
    assert_eq!(record.registration_date, "2015-01-01");
    assert_eq!(kyc_calls.load(Ordering::SeqCst), 1);
    assert_eq!(registry_calls.load(Ordering::SeqCst), 1);

    let json = serde_json::to_value(&record).unwrap();
    assert!(json["companyName"].is_null());
}

#[tokio::test]
async fn kyc_failure_falls_through_to_registry() {
    let registry = ScriptedSource::answering("registry_portal", "Delhi Traders Private Limited")
        .attributed_to(ResolutionSource::RegistryPortal);
    let registry_calls = registry.counter();

    let resolver = CompanyResolver::new()
        .with_source(KnownCompanies::builtin())
        .with_source(ScriptedSource::failing("kyc_api", "HTTP 503"))
        .with_source(registry);

    let record = resolver.resolve(UNKNOWN).await.unwrap();

    assert_eq!(
        record.company_name.as_deref(),
        Some("Delhi Traders Private Limited")
    );
    assert_eq!(record.source, ResolutionSource::RegistryPortal);
    assert_eq!(registry_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn first_answer_wins() {
    let second = ScriptedSource::answering("registry_portal", "Second");
    let second_calls = second.counter();

    let resolver = CompanyResolver::new()
        .with_source(ScriptedSource::answering("kyc_api", "First"))
        .with_source(second);

    let record = resolver.resolve(UNKNOWN).await.unwrap();
    assert_eq!(record.company_name.as_deref(), Some("First"));
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn extra_known_entry_is_used() {
    let cin = cin_resolver::Cin::parse(UNKNOWN).unwrap();
    let resolver = CompanyResolver::new()
        .with_source(KnownCompanies::empty().with_entry(&cin, "Verified Delhi Co"));

    let record = resolver.resolve_cin(&cin).await;
    assert_eq!(record.company_name.as_deref(), Some("Verified Delhi Co"));
    assert_eq!(record.status, "Active");
}

#[tokio::test]
async fn malformed_cin_is_rejected_before_any_source() {
    let kyc = ScriptedSource::answering("kyc_api", "Anything");
    let kyc_calls = kyc.counter();
    let resolver = CompanyResolver::new().with_source(kyc);

    let err = resolver.resolve("U72900PN2022").await.unwrap_err();

    assert!(matches!(err, CinError::InvalidLength { .. }));
    assert_eq!(kyc_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unreachable_http_sources_degrade_to_unresolved() {
    // Nothing listens on port 9 on loopback; both requests fail fast.
    let kyc = KycClient::new(
        KycConfig::new("http://127.0.0.1:9/company", "test-key")
            .with_timeout(Duration::from_secs(2)),
    )
    .unwrap();
    let registry = RegistryPortalClient::new(
        RegistryConfig::new("http://127.0.0.1:9/master-data").with_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let resolver = CompanyResolver::new()
        .with_source(KnownCompanies::builtin())
        .with_source(kyc)
        .with_source(registry);

    assert_eq!(
        resolver.source_names(),
        vec!["known_table", "kyc_api", "registry_portal"]
    );

    let record = resolver.resolve(UNKNOWN).await.unwrap();
    assert_eq!(record.company_name, None);
    assert_eq!(record.source, ResolutionSource::Unresolved);
}
