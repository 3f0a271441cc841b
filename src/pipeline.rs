//! End-to-end drivers: genome (and annotation) in, tab-delimited table out
//!
//! | Driver | Inputs | Columns | Positions |
//! |--------|--------|---------|-----------|
//! | [`run_train`] | FASTA + GTF | `class`, sensors | chunked random sample |
//! | [`run_verify`] | FASTA + GTF | `location`, `expect`, sensors | every position |
//! | [`run_encode`] | FASTA | `location`, `codon`, sensors | every position |
//!
//! Configuration is validated before any input is opened, and every input
//! path is checked for existence up front, so a bad invocation fails
//! without writing partial output.

use crate::annotation::{CodingMap, LocationList};
use crate::classify::{ClassScheme, LocationClassifier};
use crate::error::{Result, SensorError};
use crate::io::{CompressedWriter, DataSink, FastaStream};
use crate::output::{validate_fuzz, BalancedWriter, LabelCounts};
use crate::sampler::{ChunkedSampler, SampleStats, SamplerConfig};
use crate::sensor::{CodonFilter, FactoryKind, SensorFactory, SensorWidths};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Settings for [`run_train`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    /// Sensor encoding
    pub kind: FactoryKind,
    /// Sensor window
    pub widths: SensorWidths,
    /// Label vocabulary
    pub scheme: ClassScheme,
    /// Label reverse-strand coding regions
    pub negative: bool,
    /// Chunk size, run length and seed
    pub sampler: SamplerConfig,
    /// Balance fuzz factor; `0` writes every sampled row
    pub balance: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            kind: FactoryKind::Channel,
            widths: SensorWidths::default(),
            scheme: ClassScheme::Edge,
            negative: false,
            sampler: SamplerConfig::default(),
            balance: 0.0,
        }
    }
}

impl TrainConfig {
    /// Check every setting without touching any input
    pub fn validate(&self) -> Result<()> {
        self.widths.validate(self.kind)?;
        self.sampler.validate()?;
        validate_fuzz(self.balance)
    }
}

/// Settings for [`run_verify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Sensor encoding
    pub kind: FactoryKind,
    /// Sensor window
    pub widths: SensorWidths,
    /// Label vocabulary
    pub scheme: ClassScheme,
    /// Label reverse-strand coding regions
    pub negative: bool,
    /// Only write positions on the scheme's boundary codons
    pub edge_filter: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            kind: FactoryKind::Channel,
            widths: SensorWidths::default(),
            scheme: ClassScheme::Edge,
            negative: false,
            edge_filter: false,
        }
    }
}

impl VerifyConfig {
    /// Check every setting without touching any input
    pub fn validate(&self) -> Result<()> {
        self.widths.validate(self.kind)
    }
}

/// Settings for [`run_encode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeConfig {
    /// Sensor encoding
    pub kind: FactoryKind,
    /// Sensor window
    pub widths: SensorWidths,
    /// Only write positions on start or stop codons
    pub edge_filter: bool,
    /// Include reverse-complement codons in the edge filter
    pub negative: bool,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            kind: FactoryKind::Channel,
            widths: SensorWidths::default(),
            edge_filter: false,
            negative: false,
        }
    }
}

impl EncodeConfig {
    /// Check every setting without touching any input
    pub fn validate(&self) -> Result<()> {
        self.widths.validate(self.kind)
    }
}

/// What a driver did
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Contigs read
    pub contigs: usize,
    /// Total bases across those contigs
    pub bases: usize,
    /// Contigs with no coding region in the annotation
    pub unannotated: usize,
    /// Position counters
    pub stats: SampleStats,
    /// Per-label `(written, emitted)` rows
    pub labels: LabelCounts,
}

impl RunSummary {
    /// Rows written after any balancing
    pub fn rows(&self) -> usize {
        self.labels.values().map(|(_, emitted)| emitted).sum()
    }

    fn count_label(&mut self, label: &str) {
        let entry = self.labels.entry(label.to_string()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += 1;
    }
}

fn require_input(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(SensorError::MissingInput {
            path: path.to_path_buf(),
        })
    }
}

fn header(leading: &[&str], factory: &SensorFactory) -> String {
    leading
        .iter()
        .map(|s| s.to_string())
        .chain(factory.headers())
        .collect::<Vec<_>>()
        .join("\t")
}

fn contig_lookup(map: &CodingMap, id: &str, length: usize, summary: &mut RunSummary) -> LocationList {
    if !map.contains(id) {
        warn!(contig = id, "no coding regions annotated; every position is non-coding");
        summary.unannotated += 1;
    }
    map.location_list(id, length)
}

/// Sample labelled training rows from an annotated genome
///
/// Each contig is traversed by a [`ChunkedSampler`]; the boundary schemes
/// restrict sampling to start/stop codons. Rows go through a
/// [`BalancedWriter`] with the configured fuzz factor.
pub fn run_train(
    genome: &Path,
    annotation: &Path,
    sink: DataSink,
    config: &TrainConfig,
) -> Result<RunSummary> {
    config.validate()?;
    let factory = SensorFactory::new(config.kind, config.widths)?;
    let classifier = LocationClassifier::new(config.scheme, config.negative);
    let filter = config.scheme.codon_filter(config.negative);
    let mut sampler = ChunkedSampler::new(config.sampler)?;
    require_input(genome)?;
    require_input(annotation)?;

    info!(path = %annotation.display(), "reading annotation");
    let map = CodingMap::from_gtf_path(annotation)?;

    let mut output = CompressedWriter::new(sink)?;
    let mut writer = BalancedWriter::new(
        &mut output,
        &header(&["class"], &factory),
        config.balance,
        config.sampler.seed,
    )?;

    info!(path = %genome.display(), "sampling genome");
    let mut summary = RunSummary::default();
    for record in FastaStream::from_path(genome)? {
        let record = record?;
        let lookup = contig_lookup(&map, &record.id, record.len(), &mut summary);
        let bound = classifier.bind(&lookup);
        let stats = sampler.sample_contig(
            &record.id,
            &record.sequence,
            &factory,
            filter.as_ref(),
            &bound,
            |label, sensor| writer.write(label, &sensor.values().to_string()),
        )?;
        debug!(
            contig = %record.id,
            length = record.len(),
            runs = stats.runs,
            accepted = stats.accepted,
            "sampled contig"
        );
        summary.contigs += 1;
        summary.bases += record.len();
        summary.stats.merge(&stats);
    }

    summary.labels = writer.close()?;
    drop(writer);
    output.finish()?;
    Ok(summary)
}

/// Write every labelled position of an annotated genome
///
/// Rows carry the position's `id;pos` location and expected label, so a
/// model's predictions can be checked against the annotation.
pub fn run_verify(
    genome: &Path,
    annotation: &Path,
    sink: DataSink,
    config: &VerifyConfig,
) -> Result<RunSummary> {
    config.validate()?;
    let factory = SensorFactory::new(config.kind, config.widths)?;
    let classifier = LocationClassifier::new(config.scheme, config.negative);
    let filter = if config.edge_filter {
        config.scheme.codon_filter(config.negative)
    } else {
        None
    };
    require_input(genome)?;
    require_input(annotation)?;

    info!(path = %annotation.display(), "reading annotation");
    let map = CodingMap::from_gtf_path(annotation)?;

    let mut output = CompressedWriter::new(sink)?;
    writeln!(output, "{}", header(&["location", "expect"], &factory))?;

    info!(path = %genome.display(), "verifying genome");
    let mut summary = RunSummary::default();
    for record in FastaStream::from_path(genome)? {
        let record = record?;
        let lookup = contig_lookup(&map, &record.id, record.len(), &mut summary);
        let bound = classifier.bind(&lookup);
        let sequence = &record.sequence;

        for position in 1..=sequence.len() {
            summary.stats.scanned += 1;
            if let Some(filter) = &filter {
                if !filter.matches(position, sequence) {
                    summary.stats.filtered += 1;
                    continue;
                }
            }
            let sensor = factory.create(&record.id, position, sequence);
            if sensor.is_suspicious() {
                summary.stats.suspicious += 1;
                continue;
            }
            let Some(label) = bound.class_of(position) else {
                summary.stats.unlabelled += 1;
                continue;
            };
            writeln!(output, "{}\t{}\t{}", sensor.meta(), label, sensor.values())?;
            summary.stats.accepted += 1;
            *summary.stats.labels.entry(label).or_insert(0) += 1;
            summary.count_label(label);
        }

        debug!(contig = %record.id, length = record.len(), "verified contig");
        summary.contigs += 1;
        summary.bases += record.len();
    }

    output.finish()?;
    Ok(summary)
}

/// Encode every position of a genome without labels
///
/// The `codon` column holds the (up to) three bases starting at the
/// position. With the edge filter on, only start and stop codons are kept
/// and the filter is checked before a position is encoded.
pub fn run_encode(genome: &Path, sink: DataSink, config: &EncodeConfig) -> Result<RunSummary> {
    config.validate()?;
    let factory = SensorFactory::new(config.kind, config.widths)?;
    let filter = config
        .edge_filter
        .then(|| CodonFilter::edges(config.negative));
    require_input(genome)?;

    let mut output = CompressedWriter::new(sink)?;
    writeln!(output, "{}", header(&["location", "codon"], &factory))?;

    info!(path = %genome.display(), "encoding genome");
    let mut summary = RunSummary::default();
    for record in FastaStream::from_path(genome)? {
        let record = record?;
        let sequence = &record.sequence;
        let length = record.len();

        match &filter {
            // no filter: the lazy scan skips suspicious windows
            None => {
                let mut clean = 0;
                for sensor in factory.scan(&record.id, sequence, 1, length) {
                    writeln!(output, "{}\t{}\t{}", sensor.meta(), sensor.codon(), sensor.values())?;
                    clean += 1;
                }
                summary.stats.scanned += length;
                summary.stats.suspicious += length - clean;
                summary.stats.accepted += clean;
            }
            Some(filter) => {
                for position in 1..=length {
                    summary.stats.scanned += 1;
                    if !filter.matches(position, sequence) {
                        summary.stats.filtered += 1;
                        continue;
                    }
                    let sensor = factory.create(&record.id, position, sequence);
                    if sensor.is_suspicious() {
                        summary.stats.suspicious += 1;
                        continue;
                    }
                    writeln!(output, "{}\t{}\t{}", sensor.meta(), sensor.codon(), sensor.values())?;
                    summary.stats.accepted += 1;
                }
            }
        }

        debug!(contig = %record.id, length, "encoded contig");
        summary.contigs += 1;
        summary.bases += length;
    }
    if summary.stats.accepted > 0 {
        summary
            .labels
            .insert("encoded".to_string(), (summary.stats.accepted, summary.stats.accepted));
    }

    output.finish()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let train = TrainConfig::default();
        assert_eq!(train.widths, SensorWidths::new(21, 44));
        assert_eq!(train.kind, FactoryKind::Channel);
        assert_eq!(train.scheme, ClassScheme::Edge);
        assert_eq!(train.sampler.chunk_size, 50_000);
        assert_eq!(train.sampler.run_length, 200);
        assert!(train.validate().is_ok());
        assert!(VerifyConfig::default().validate().is_ok());
        assert!(EncodeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_precedes_io() {
        let missing = Path::new("/nonexistent/genome.fna");
        let config = TrainConfig {
            balance: 3.0,
            ..Default::default()
        };
        let err = run_train(missing, missing, DataSink::stdout(), &config).unwrap_err();
        assert!(err.is_config());

        let config = EncodeConfig {
            kind: FactoryKind::AminoAcid,
            widths: SensorWidths::new(4, 4),
            ..Default::default()
        };
        let err = run_encode(missing, DataSink::stdout(), &config).unwrap_err();
        assert!(matches!(err, SensorError::InvalidWidths { .. }));
    }

    #[test]
    fn test_train_and_writer_agree_on_fuzz() {
        for fuzz in [0.0, 0.5, 1.0, 1.5, 2.0, 2.01, -1.0, f64::NAN] {
            let config = TrainConfig {
                balance: fuzz,
                ..Default::default()
            };
            let writer = BalancedWriter::new(Vec::new(), "class", fuzz, Some(0));
            assert_eq!(config.validate().is_ok(), writer.is_ok(), "fuzz {}", fuzz);
        }
    }

    #[test]
    fn test_missing_input() {
        let missing = Path::new("/nonexistent/genome.fna");
        let err = run_encode(missing, DataSink::stdout(), &EncodeConfig::default()).unwrap_err();
        assert!(matches!(err, SensorError::MissingInput { .. }));
    }

    #[test]
    fn test_header() {
        let factory = SensorFactory::new(FactoryKind::Direct, SensorWidths::new(1, 1)).unwrap();
        assert_eq!(
            header(&["location", "expect"], &factory),
            "location\texpect\tpos.-1\tpos.0\tpos.1"
        );
    }
}
