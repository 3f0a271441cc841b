//! Common types used throughout contig-sensors

/// A FASTA record: one contig or query sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// Sequence identifier (without '>' prefix)
    pub id: String,
    /// DNA sequence
    pub sequence: Vec<u8>,
}

impl FastaRecord {
    /// Create a new FASTA record
    pub fn new(id: String, sequence: Vec<u8>) -> Self {
        Self { id, sequence }
    }

    /// Number of bases in the record
    ///
    /// # Examples
    ///
    /// ```
    /// use contig_sensors::FastaRecord;
    ///
    /// let record = FastaRecord::new("ctg1".to_string(), b"ACGTN".to_vec());
    /// assert_eq!(record.len(), 5);
    /// ```
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Check if the record has an empty sequence
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
