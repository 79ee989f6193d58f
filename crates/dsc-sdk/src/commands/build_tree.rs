use std::sync::Arc;

use dsc_certs::{CscaStore, ParseError, RawCertificate, parse_certificate, read_certificate_set};
use dsc_core::base::FieldElement;
use dsc_core::descriptor::Descriptors;
use dsc_core::leaf::{Exclusion, leaf_value};
use dsc_core::model::CertificateRecord;
use dsc_core::schema::summary::BuildSummary;
use dsc_imt::DscTree;
use eyre::Context as _;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use super::tree_file::{create_parent, write_tree};
use crate::common::{BuildConfig, LeafOrder};
use crate::stats::BuildStats;

/// A certificate after parsing, classification and leaf hashing.
struct ProcessedCertificate {
    identifier: String,
    outcome: Outcome,
}

enum Outcome {
    Unparseable(ParseError),
    Parsed {
        fingerprint: String,
        record: CertificateRecord,
        descriptors: Descriptors,
        leaf: Result<FieldElement, Exclusion>,
    },
}

impl ProcessedCertificate {
    fn sort_key(&self, order: LeafOrder) -> (&str, &str) {
        let fingerprint = match (&self.outcome, order) {
            (Outcome::Parsed { fingerprint, .. }, LeafOrder::Fingerprint) => fingerprint.as_str(),
            (Outcome::Parsed { .. } | Outcome::Unparseable(_), _) => "",
        };
        (fingerprint, self.identifier.as_str())
    }
}

/// Build the DSC tree from a certificate set and write it out.
///
/// Certificates are parsed, classified and hashed concurrently, then sorted into the
/// canonical leaf order and inserted by this task alone.
///
/// # Errors
/// Returns an error if the input set cannot be read or an output cannot be written.
/// Certificates that fail to parse or are not eligible are reported in the summary
/// and do not fail the build.
#[instrument(skip_all, fields(root = %config.certificates.root().display()))]
pub async fn build_dsc_tree(config: BuildConfig) -> eyre::Result<BuildSummary> {
    let certificates = read_certificate_set(&config.certificates)
        .await
        .context("Failed to read certificate set")?;
    let inputs = certificates.len();

    let csca = match &config.csca_dir {
        Some(dir) => CscaStore::load(dir)
            .await
            .context("Failed to load CSCA certificates")?,
        None => {
            warn!("No CSCA directory, RSA-PSS issuer salts will not be committed");
            CscaStore::default()
        }
    };

    let mut processed = process_all(certificates, Arc::new(csca)).await?;
    processed.sort_by(|a, b| a.sort_key(config.order).cmp(&b.sort_key(config.order)));

    let mut stats = BuildStats::default();
    let mut tree = DscTree::new();
    for certificate in processed {
        insert_certificate(&mut tree, &mut stats, certificate);
    }

    write_tree(&tree, &config.tree_out, &config.publish).await?;

    let summary = stats.into_summary(tree.root().copied(), tree.size(), inputs);
    if let Some(path) = &config.summary_out {
        let json = serde_json::to_string_pretty(&summary)?;
        create_parent(path).await?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
        info!(file = ?path, "Exported summary");
    }

    log_summary(&summary);
    Ok(summary)
}

async fn process_all(
    certificates: Vec<RawCertificate>,
    csca: Arc<CscaStore>,
) -> eyre::Result<Vec<ProcessedCertificate>> {
    let mut tasks = JoinSet::new();
    for certificate in certificates {
        let csca = Arc::clone(&csca);
        tasks.spawn_blocking(move || process_certificate(certificate, &csca));
    }

    let mut processed = Vec::with_capacity(tasks.len());
    while let Some(result) = tasks.join_next().await {
        processed.push(result.context("Certificate task failed")?);
    }
    Ok(processed)
}

fn process_certificate(certificate: RawCertificate, csca: &CscaStore) -> ProcessedCertificate {
    let outcome = match parse_certificate(&certificate.bytes) {
        Err(e) => Outcome::Unparseable(e),
        Ok(parsed) => {
            let issuer = csca.resolve(&parsed);
            Outcome::Parsed {
                descriptors: Descriptors::describe(&parsed.record, issuer),
                leaf: leaf_value(&parsed.record, issuer),
                fingerprint: parsed.fingerprint,
                record: parsed.record,
            }
        }
    };
    ProcessedCertificate {
        identifier: certificate.identifier,
        outcome,
    }
}

fn insert_certificate(
    tree: &mut DscTree,
    stats: &mut BuildStats,
    certificate: ProcessedCertificate,
) {
    let identifier = certificate.identifier.as_str();
    match certificate.outcome {
        Outcome::Unparseable(e) => {
            warn!(identifier, "Skipping unparseable certificate: {e}");
            stats.record_unparseable(identifier, e);
        }
        Outcome::Parsed {
            record,
            descriptors,
            leaf,
            ..
        } => {
            stats.observe(&record);
            match leaf {
                Ok(leaf) => {
                    debug!(identifier, leaf = %leaf, index = tree.size(), "Inserting leaf");
                    stats.record_descriptors(identifier, &descriptors);
                    tree.insert(leaf);
                }
                Err(exclusion) => {
                    warn!(identifier, "Skipping certificate: {exclusion}");
                    stats.record_excluded(identifier, &record, &exclusion);
                }
            }
        }
    }
}

fn log_summary(summary: &BuildSummary) {
    if summary.incomplete_csca_descriptors.is_empty() {
        debug!("All CSCA descriptors complete");
    } else {
        warn!(
            files = ?summary.incomplete_csca_descriptors,
            "CSCA descriptors with missing fields"
        );
    }
    if !summary.incomplete_dsc_descriptors.is_empty() {
        warn!(
            files = ?summary.incomplete_dsc_descriptors,
            "DSC descriptors with missing fields"
        );
    }
    debug!(
        max_tbs_length = summary.max_tbs_length,
        max_key_bits = summary.max_key_bits,
        oversized_keys = ?summary.oversized_keys,
        "Certificate maxima"
    );

    match &summary.root {
        Some(root) => info!(
            root = %root,
            leaves = summary.leaf_count,
            inputs = summary.inputs,
            unparseable = summary.unparseable.len(),
            excluded = summary.excluded.len(),
            "Built DSC tree"
        ),
        None => warn!(inputs = summary.inputs, "Built an empty DSC tree"),
    }
}
