//! Certificate adapters for the DSC tree: X.509 parsing, input sets and issuer lookup.

mod csca;
mod oids;
mod parse;
mod source;

pub use csca::CscaStore;
pub use parse::{ParseError, ParsedCertificate, parse_certificate};
pub use source::{
    CertificateSet, MOCK_CERTIFICATE_FILE, RawCertificate, SourceError, read_certificate_set,
};
