//! # Document Intake
//!
//! Curates the in-memory list of booking documents the user wants attached
//! (tickets, passport scans, visas). Files arrive as *batches* — one
//! drag-drop or one file-requester round — and a batch is admitted
//! atomically against the file-count cap: per-file size/type filtering
//! happens first, then either every surviving file is admitted or none are.
//!
//! Only metadata is handled here. Actually moving bytes anywhere is the
//! transport's problem (`transport::UploadTransport`), and the bundled
//! transport just sleeps.
//!
//! Validation failures are user-facing notices, not errors: they surface on
//! the status line and leave prior state untouched.

pub mod requester;
pub mod transport;

use uuid::Uuid;

/// A candidate file, metadata only. Contents are never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    /// MIME type when known (e.g. "image/png"). Unknown is fine — suffix
    /// patterns can still match.
    pub mime: Option<String>,
    pub size_bytes: u64,
}

/// Intake limits. Defaults mirror the booking backend's upload policy.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub max_files: usize,
    pub max_size_mb: u64,
    /// Accepted-type patterns. Entries with a `*` match by MIME prefix
    /// ("image/*"); entries without match by filename suffix (".pdf"),
    /// case-insensitive.
    pub accepted_types: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_files: 5,
            max_size_mb: 10,
            accepted_types: vec![
                "image/*".to_string(),
                ".pdf".to_string(),
                ".doc".to_string(),
                ".docx".to_string(),
            ],
        }
    }
}

impl IntakeConfig {
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb * 1024 * 1024
    }
}

/// Does `candidate` match a single accepted-type pattern?
pub fn matches_pattern(candidate: &FileCandidate, pattern: &str) -> bool {
    if let Some(star) = pattern.find('*') {
        let prefix = &pattern[..star];
        candidate
            .mime
            .as_deref()
            .is_some_and(|mime| mime.to_ascii_lowercase().starts_with(&prefix.to_ascii_lowercase()))
    } else {
        candidate
            .name
            .to_ascii_lowercase()
            .ends_with(&pattern.to_ascii_lowercase())
    }
}

/// A validated batch waiting on its (simulated) upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBatch {
    pub id: Uuid,
    pub files: Vec<FileCandidate>,
}

/// Outcome of presenting a batch to the session.
#[derive(Debug)]
pub enum BatchOutcome {
    /// Survivors admitted pending upload; notices cover any per-file drops.
    Upload(PendingBatch, Vec<String>),
    /// Nothing changed. Covers the all-or-nothing count rejection, the
    /// in-flight guard, and batches where no file survived filtering.
    Refused(Vec<String>),
}

/// Drag-and-drop signals from the host surface.
#[derive(Debug)]
pub enum DragSignal {
    Enter,
    Over,
    Leave,
    Drop(Vec<FileCandidate>),
}

/// One mounted intake surface: the accepted list plus transient drag and
/// upload flags.
///
/// Invariant: `accepted.len() <= config.max_files`, and every entry passed
/// the size and type checks at the time of intake.
pub struct IntakeSession {
    pub config: IntakeConfig,
    pub accepted: Vec<FileCandidate>,
    pub drag_active: bool,
    /// The batch whose upload is in flight, if any.
    pub in_flight: Option<PendingBatch>,
}

impl IntakeSession {
    pub fn new(config: IntakeConfig) -> Self {
        Self {
            config,
            accepted: Vec::new(),
            drag_active: false,
            in_flight: None,
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Apply a drag signal. `Drop` yields the batch for `begin_batch` and,
    /// like `Leave`, clears the active flag.
    pub fn apply_drag(&mut self, signal: DragSignal) -> Option<Vec<FileCandidate>> {
        match signal {
            DragSignal::Enter | DragSignal::Over => {
                self.drag_active = true;
                None
            }
            DragSignal::Leave => {
                self.drag_active = false;
                None
            }
            DragSignal::Drop(files) => {
                self.drag_active = false;
                (!files.is_empty()).then_some(files)
            }
        }
    }

    /// Validate a batch and, if anything survives, stage it for upload.
    ///
    /// Filtering is per-file: an oversized or wrong-typed file is dropped
    /// with a notice while the rest continue. The count check is per-batch:
    /// if the survivors would push the accepted list past `max_files`, the
    /// entire batch is refused and no state changes.
    ///
    /// Batches are serialized: while one upload is in flight, a new batch
    /// is refused rather than racing the count check against a stale count.
    pub fn begin_batch(&mut self, candidates: Vec<FileCandidate>) -> BatchOutcome {
        if self.is_uploading() {
            return BatchOutcome::Refused(vec![
                "Upload in progress. Wait for it to finish.".to_string(),
            ]);
        }

        let mut notices = Vec::new();
        let mut valid = Vec::new();
        for file in candidates {
            if file.size_bytes > self.config.max_size_bytes() {
                notices.push(format!(
                    "{} is too large. Max size is {} MB.",
                    file.name, self.config.max_size_mb
                ));
                continue;
            }
            if !self
                .config
                .accepted_types
                .iter()
                .any(|pattern| matches_pattern(&file, pattern))
            {
                notices.push(format!("{} is not an accepted file type.", file.name));
                continue;
            }
            valid.push(file);
        }

        if self.accepted.len() + valid.len() > self.config.max_files {
            notices.push(format!(
                "Cannot attach more than {} files.",
                self.config.max_files
            ));
            return BatchOutcome::Refused(notices);
        }

        if valid.is_empty() {
            return BatchOutcome::Refused(notices);
        }

        let batch = PendingBatch {
            id: Uuid::new_v4(),
            files: valid,
        };
        self.in_flight = Some(batch.clone());
        BatchOutcome::Upload(batch, notices)
    }

    /// Complete the in-flight batch, appending its files in input order.
    /// Returns the full new accepted list (the caller reports it upward —
    /// always the complete list, never a delta). A stale or unknown batch
    /// id is ignored.
    pub fn finish_batch(&mut self, id: Uuid) -> Option<Vec<FileCandidate>> {
        let batch = self.in_flight.take_if(|b| b.id == id)?;
        self.accepted.extend(batch.files);
        Some(self.accepted.clone())
    }

    /// Remove the entry at `index`, preserving relative order of the rest.
    /// Returns the full resulting list; out-of-range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<Vec<FileCandidate>> {
        if index >= self.accepted.len() {
            return None;
        }
        self.accepted.remove(index);
        Some(self.accepted.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mb(n: f64) -> u64 {
        (n * 1024.0 * 1024.0) as u64
    }

    fn image(name: &str, size: u64) -> FileCandidate {
        FileCandidate {
            name: name.to_string(),
            mime: Some("image/png".to_string()),
            size_bytes: size,
        }
    }

    fn pdf(name: &str, size: u64) -> FileCandidate {
        FileCandidate {
            name: name.to_string(),
            mime: Some("application/pdf".to_string()),
            size_bytes: size,
        }
    }

    fn session() -> IntakeSession {
        IntakeSession::new(IntakeConfig::default())
    }

    #[test]
    fn test_wildcard_matches_mime_prefix() {
        let file = image("passport.png", 100);
        assert!(matches_pattern(&file, "image/*"));
        assert!(!matches_pattern(&file, "video/*"));
        // No mime → wildcard can't match
        let no_mime = FileCandidate {
            name: "scan.png".to_string(),
            mime: None,
            size_bytes: 100,
        };
        assert!(!matches_pattern(&no_mime, "image/*"));
    }

    #[test]
    fn test_suffix_matches_case_insensitive() {
        let file = FileCandidate {
            name: "Itinerary.PDF".to_string(),
            mime: None,
            size_bytes: 100,
        };
        assert!(matches_pattern(&file, ".pdf"));
        assert!(!matches_pattern(&file, ".docx"));
    }

    #[test]
    fn test_valid_batch_admitted_in_order() {
        let mut s = session();
        let outcome = s.begin_batch(vec![image("a.png", mb(0.5)), pdf("b.pdf", mb(0.5))]);
        let BatchOutcome::Upload(batch, notices) = outcome else {
            panic!("expected upload");
        };
        assert!(notices.is_empty());
        assert!(s.is_uploading());

        let list = s.finish_batch(batch.id).unwrap();
        assert_eq!(
            list.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            ["a.png", "b.pdf"]
        );
        assert!(!s.is_uploading());
    }

    #[test]
    fn test_oversized_file_filtered_others_admitted() {
        let mut s = session();
        let outcome = s.begin_batch(vec![
            image("big.png", mb(11.0)),
            image("small.png", mb(1.0)),
        ]);
        let BatchOutcome::Upload(batch, notices) = outcome else {
            panic!("expected upload");
        };
        assert_eq!(notices.len(), 1);
        assert!(notices[0].contains("big.png"));
        assert_eq!(batch.files.len(), 1);
        assert_eq!(batch.files[0].name, "small.png");
    }

    #[test]
    fn test_wrong_type_filtered() {
        let mut s = session();
        let outcome = s.begin_batch(vec![FileCandidate {
            name: "malware.exe".to_string(),
            mime: Some("application/x-msdownload".to_string()),
            size_bytes: 100,
        }]);
        let BatchOutcome::Refused(notices) = outcome else {
            panic!("expected refusal");
        };
        assert!(notices[0].contains("not an accepted file type"));
        assert!(s.accepted.is_empty());
        assert!(!s.is_uploading());
    }

    #[test]
    fn test_count_cap_rejects_whole_batch() {
        let mut s = IntakeSession::new(IntakeConfig {
            max_files: 2,
            ..Default::default()
        });
        s.accepted.push(image("existing.png", 100));

        // Two survivors + one existing = 3 > 2: all-or-nothing refusal.
        let outcome = s.begin_batch(vec![image("a.png", 100), image("b.png", 100)]);
        assert!(matches!(outcome, BatchOutcome::Refused(_)));
        assert_eq!(s.accepted.len(), 1);
        assert!(!s.is_uploading());
    }

    #[test]
    fn test_filtering_happens_before_count_check() {
        let mut s = IntakeSession::new(IntakeConfig {
            max_files: 2,
            max_size_mb: 1,
            ..Default::default()
        });
        s.accepted.push(image("existing.png", 100));

        // Three candidates, but two are oversized; the single survivor fits.
        let outcome = s.begin_batch(vec![
            image("huge1.png", mb(2.0)),
            image("huge2.png", mb(2.0)),
            image("ok.png", mb(0.5)),
        ]);
        let BatchOutcome::Upload(batch, notices) = outcome else {
            panic!("expected upload");
        };
        assert_eq!(notices.len(), 2);
        assert_eq!(batch.files[0].name, "ok.png");
    }

    #[test]
    fn test_spec_scenario_two_file_cap() {
        let mut s = IntakeSession::new(IntakeConfig {
            max_files: 2,
            max_size_mb: 1,
            ..Default::default()
        });

        // 2MB alone → rejected, list stays empty.
        let outcome = s.begin_batch(vec![image("big.png", mb(2.0))]);
        assert!(matches!(outcome, BatchOutcome::Refused(_)));
        assert!(s.accepted.is_empty());

        // Two 0.5MB files → both accepted in one report.
        let outcome = s.begin_batch(vec![image("a.png", mb(0.5)), image("b.png", mb(0.5))]);
        let BatchOutcome::Upload(batch, _) = outcome else {
            panic!("expected upload");
        };
        let list = s.finish_batch(batch.id).unwrap();
        assert_eq!(list.len(), 2);

        // A third valid file → refused for exceeding the cap, list stays at 2.
        let outcome = s.begin_batch(vec![image("c.png", mb(0.5))]);
        let BatchOutcome::Refused(notices) = outcome else {
            panic!("expected refusal");
        };
        assert!(notices[0].contains("more than 2"));
        assert_eq!(s.accepted.len(), 2);
    }

    #[test]
    fn test_batches_serialized_while_uploading() {
        let mut s = session();
        let BatchOutcome::Upload(batch, _) = s.begin_batch(vec![image("a.png", 100)]) else {
            panic!("expected upload");
        };
        // Second batch before the first resolves → refused, not raced.
        let outcome = s.begin_batch(vec![image("b.png", 100)]);
        let BatchOutcome::Refused(notices) = outcome else {
            panic!("expected refusal");
        };
        assert!(notices[0].contains("in progress"));

        let list = s.finish_batch(batch.id).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_stale_batch_id_ignored() {
        let mut s = session();
        assert_eq!(s.finish_batch(Uuid::new_v4()), None);
        assert!(s.accepted.is_empty());
    }

    #[test]
    fn test_remove_preserves_order_and_reports_full_list() {
        let mut s = session();
        s.accepted = vec![
            image("a.png", 1),
            image("b.png", 2),
            image("c.png", 3),
        ];
        let list = s.remove(1).unwrap();
        assert_eq!(
            list.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            ["a.png", "c.png"]
        );
        // Out of range is a no-op.
        assert_eq!(s.remove(5), None);
        assert_eq!(s.accepted.len(), 2);
    }

    #[test]
    fn test_drag_state_machine() {
        let mut s = session();
        assert!(s.apply_drag(DragSignal::Enter).is_none());
        assert!(s.drag_active);
        assert!(s.apply_drag(DragSignal::Over).is_none());
        assert!(s.drag_active);
        assert!(s.apply_drag(DragSignal::Leave).is_none());
        assert!(!s.drag_active);

        s.apply_drag(DragSignal::Enter);
        let files = s.apply_drag(DragSignal::Drop(vec![image("a.png", 1)]));
        assert_eq!(files.unwrap().len(), 1);
        assert!(!s.drag_active);

        // Empty drop yields no batch.
        assert!(s.apply_drag(DragSignal::Drop(vec![])).is_none());
    }
}
