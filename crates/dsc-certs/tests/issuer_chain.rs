#![allow(missing_docs)]

use dsc_certs::{CscaStore, parse_certificate};
use dsc_core::model::{Curve, EcKey, HashAlgorithm, SignatureScheme};
use rcgen::{
    BasicConstraints, CertificateParams, DnType, IsCa, KeyPair, PKCS_ECDSA_P256_SHA256,
    PKCS_ECDSA_P384_SHA384,
};

struct Chain {
    csca_pem: String,
    dsc_pem: String,
}

fn chain() -> Chain {
    let csca_key = KeyPair::generate_for(&PKCS_ECDSA_P384_SHA384).expect("Failed to generate key");
    let mut csca_params =
        CertificateParams::new(Vec::<String>::new()).expect("Failed to create params");
    csca_params
        .distinguished_name
        .push(DnType::CommonName, "CSCA Utopia");
    csca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let csca = csca_params
        .self_signed(&csca_key)
        .expect("Failed to sign CSCA");

    let dsc_key = KeyPair::generate_for(&PKCS_ECDSA_P256_SHA256).expect("Failed to generate key");
    let mut dsc_params =
        CertificateParams::new(Vec::<String>::new()).expect("Failed to create params");
    dsc_params
        .distinguished_name
        .push(DnType::CommonName, "DS Utopia 01");
    dsc_params.use_authority_key_identifier_extension = true;
    let dsc = dsc_params
        .signed_by(&dsc_key, &csca, &csca_key)
        .expect("Failed to sign DSC");

    Chain {
        csca_pem: csca.pem(),
        dsc_pem: dsc.pem(),
    }
}

#[test]
fn dsc_signed_by_csca() {
    let chain = chain();
    let csca = parse_certificate(chain.csca_pem.as_bytes()).expect("Failed to parse CSCA");
    let dsc = parse_certificate(chain.dsc_pem.as_bytes()).expect("Failed to parse DSC");

    // The issuer's digest, the subject's key.
    assert_eq!(dsc.record.hash_algorithm, HashAlgorithm::Sha384);
    assert_eq!(
        dsc.record.scheme,
        SignatureScheme::Ecdsa(Some(EcKey {
            bits: 256,
            curve: Curve::Secp256r1
        }))
    );
    assert_eq!(dsc.record.issuer, csca.subject);
    assert!(dsc.authority_key_id.is_some());
}

#[tokio::test]
async fn store_loaded_from_directory_resolves_issuer() {
    let chain = chain();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("csca.pem"), &chain.csca_pem).expect("write");
    std::fs::write(dir.path().join("broken.pem"), b"garbage").expect("write");

    let store = CscaStore::load(dir.path()).await.expect("Failed to load store");
    assert_eq!(store.len(), 1);

    let dsc = parse_certificate(chain.dsc_pem.as_bytes()).expect("Failed to parse DSC");
    let issuer = store.resolve(&dsc).expect("Issuer not resolved");
    assert_eq!(issuer.hash_algorithm, HashAlgorithm::Sha384);
    assert_eq!(issuer.scheme.key_bits(), Some(384));
    assert_eq!(issuer.salt_length(), None);
}
