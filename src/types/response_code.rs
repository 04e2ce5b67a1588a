//! Response codes.

use super::capability::MetadataCode;
use super::sequence::UidSet;
use super::{Flag, Uid, UidValidity};

/// Response code from a tagged or untagged status response.
///
/// These provide additional information about command completion beyond the
/// bare OK/NO/BAD status, appearing in brackets after the status word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseCode {
    /// ALERT: Human-readable message that MUST be shown to user.
    Alert,
    /// BADCHARSET: SEARCH charset not supported, with the charsets the
    /// server does support.
    BadCharset(Vec<String>),
    /// CAPABILITY response code (distinct from the untagged CAPABILITY
    /// response), carrying the raw capability atoms.
    Capability(Vec<String>),
    /// PARSE: Error parsing message.
    Parse,
    /// PERMANENTFLAGS: Flags that can be changed permanently.
    PermanentFlags(Vec<Flag>),
    /// READ-ONLY: Mailbox selected as read-only.
    ReadOnly,
    /// READ-WRITE: Mailbox selected as read-write.
    ReadWrite,
    /// TRYCREATE: Mailbox doesn't exist, but can be created.
    TryCreate,
    /// UIDNEXT: Next UID to be assigned.
    UidNext(Uid),
    /// UIDVALIDITY: Unique identifier validity value.
    UidValidity(UidValidity),
    /// UNSEEN: First unseen message sequence number. Tolerated as 0 by
    /// some servers reporting an empty mailbox, so this is not a `SeqNum`.
    Unseen(u32),
    /// UIDNOTSTICKY: Mailbox does not persist assigned UIDs (RFC 4315).
    UidNotSticky,
    /// APPENDUID: UID(s) assigned to appended message(s) (RFC 4315/3502).
    AppendUid {
        /// UIDVALIDITY of the mailbox.
        uidvalidity: UidValidity,
        /// UID(s) of the appended message(s).
        uids: UidSet,
    },
    /// COPYUID: UIDs of copied messages.
    CopyUid {
        /// UIDVALIDITY of the destination mailbox.
        uidvalidity: UidValidity,
        /// Source UIDs.
        source_uids: UidSet,
        /// Destination UIDs.
        dest_uids: UidSet,
    },
    /// HIGHESTMODSEQ: Highest mod-sequence value (CONDSTORE).
    HighestModSeq(u64),
    /// NOMODSEQ: Server doesn't support mod-sequences for this mailbox.
    NoModSeq,
    /// MODIFIED: UIDs/sequence numbers not updated by a conditional STORE
    /// because their mod-sequence changed underneath it (RFC 7162).
    Modified(UidSet),
    /// CLOSED: Previously selected mailbox closed as a side effect of
    /// SELECT/EXAMINE with QRESYNC (RFC 7162).
    Closed,
    /// NOTSAVED: Search result variable could not be saved (RFC 5182).
    NotSaved,
    /// METADATA: Annotation error detail (RFC 5464).
    Metadata(MetadataCode),
    /// UNDEFINED-FILTER: Named filter referenced in a command does not
    /// exist (RFC 5466).
    UndefinedFilter(String),
    /// Best-effort informational code carrying a renamed mailbox's old and
    /// new name. Not standardized as a response code name; recorded as seen
    /// in some server dialects and passed through rather than discarded.
    NewName {
        /// Previous mailbox name.
        old: String,
        /// New mailbox name.
        new: String,
    },
    /// Unrecognized response code, kept as the raw name and any trailing text.
    Unknown(String, Option<String>),
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use crate::types::identifiers::Uid as UidType;

    #[test]
    fn alert() {
        let code = ResponseCode::Alert;
        assert!(matches!(code, ResponseCode::Alert));
    }

    #[test]
    fn capability_with_list() {
        let caps = vec!["IMAP4rev1".to_string(), "IDLE".to_string()];
        let code = ResponseCode::Capability(caps.clone());
        if let ResponseCode::Capability(c) = code {
            assert_eq!(c.len(), 2);
        } else {
            panic!("Expected Capability variant");
        }
    }

    #[test]
    fn parse() {
        let code = ResponseCode::Parse;
        assert!(matches!(code, ResponseCode::Parse));
    }

    #[test]
    fn permanent_flags() {
        let flags = vec![Flag::Seen, Flag::Answered, Flag::Deleted];
        let code = ResponseCode::PermanentFlags(flags.clone());
        if let ResponseCode::PermanentFlags(f) = code {
            assert_eq!(f.len(), 3);
        } else {
            panic!("Expected PermanentFlags variant");
        }
    }

    #[test]
    fn read_only() {
        assert!(matches!(ResponseCode::ReadOnly, ResponseCode::ReadOnly));
    }

    #[test]
    fn read_write() {
        assert!(matches!(ResponseCode::ReadWrite, ResponseCode::ReadWrite));
    }

    #[test]
    fn try_create() {
        assert!(matches!(ResponseCode::TryCreate, ResponseCode::TryCreate));
    }

    #[test]
    fn uid_next() {
        let uid = UidType::new(100).unwrap();
        let code = ResponseCode::UidNext(uid);
        if let ResponseCode::UidNext(u) = code {
            assert_eq!(u.get(), 100);
        } else {
            panic!("Expected UidNext variant");
        }
    }

    #[test]
    fn uid_validity_tolerates_zero() {
        let uv = UidValidity::new(0);
        let code = ResponseCode::UidValidity(uv);
        if let ResponseCode::UidValidity(v) = code {
            assert_eq!(v.get(), 0);
        } else {
            panic!("Expected UidValidity variant");
        }
    }

    #[test]
    fn unseen_tolerates_zero() {
        let code = ResponseCode::Unseen(0);
        if let ResponseCode::Unseen(s) = code {
            assert_eq!(s, 0);
        } else {
            panic!("Expected Unseen variant");
        }
    }

    #[test]
    fn append_uid_multi() {
        let uv = UidValidity::new(999);
        let uids = UidSet::range(UidType::new(50).unwrap(), UidType::new(52).unwrap());
        let code = ResponseCode::AppendUid {
            uidvalidity: uv,
            uids: uids.clone(),
        };
        if let ResponseCode::AppendUid { uidvalidity, uids } = code {
            assert_eq!(uidvalidity.get(), 999);
            assert_eq!(uids, UidSet::range(UidType::new(50).unwrap(), UidType::new(52).unwrap()));
        } else {
            panic!("Expected AppendUid variant");
        }
    }

    #[test]
    fn copy_uid() {
        let uv = UidValidity::new(888);
        let src = UidSet::range(UidType::new(1).unwrap(), UidType::new(2).unwrap());
        let dst = UidSet::range(UidType::new(101).unwrap(), UidType::new(102).unwrap());
        let code = ResponseCode::CopyUid {
            uidvalidity: uv,
            source_uids: src,
            dest_uids: dst,
        };
        if let ResponseCode::CopyUid { uidvalidity, .. } = code {
            assert_eq!(uidvalidity.get(), 888);
        } else {
            panic!("Expected CopyUid variant");
        }
    }

    #[test]
    fn highest_mod_seq() {
        let code = ResponseCode::HighestModSeq(987654321);
        if let ResponseCode::HighestModSeq(seq) = code {
            assert_eq!(seq, 987654321);
        } else {
            panic!("Expected HighestModSeq variant");
        }
    }

    #[test]
    fn no_mod_seq() {
        assert!(matches!(ResponseCode::NoModSeq, ResponseCode::NoModSeq));
    }

    #[test]
    fn modified() {
        let uids = UidSet::single(UidType::new(7).unwrap());
        let code = ResponseCode::Modified(uids.clone());
        assert_eq!(code, ResponseCode::Modified(uids));
    }

    #[test]
    fn metadata_maxsize() {
        let code = ResponseCode::Metadata(MetadataCode::MaxSize(1024));
        assert!(matches!(
            code,
            ResponseCode::Metadata(MetadataCode::MaxSize(1024))
        ));
    }

    #[test]
    fn unknown_with_text() {
        let code = ResponseCode::Unknown("CUSTOM-CODE".to_string(), Some("extra".to_string()));
        if let ResponseCode::Unknown(s, text) = code {
            assert_eq!(s, "CUSTOM-CODE");
            assert_eq!(text.as_deref(), Some("extra"));
        } else {
            panic!("Expected Unknown variant");
        }
    }
}
