//! Server capabilities and response status.

use std::collections::HashSet;

use bitflags::bitflags;

/// Response status from a tagged response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Command completed successfully.
    Ok,
    /// Command failed (operational error).
    No,
    /// Command failed (protocol/syntax error).
    Bad,
    /// Server greeting (pre-authenticated).
    PreAuth,
    /// Server is closing connection.
    Bye,
}

impl Status {
    /// Returns true if this is a successful status.
    #[must_use]
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok | Self::PreAuth)
    }
}

bitflags! {
    /// Server capabilities, packed as a bitset.
    ///
    /// Side-channel data that doesn't fit a single bit — AUTH mechanisms,
    /// APPENDLIMIT's numeric value, and so on — lives in [`CapabilitySet`]
    /// alongside these flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capability: u64 {
        /// `IMAP4rev1` (RFC 3501)
        const IMAP4REV1 = 1 << 0;
        /// STATUS command (implied by IMAP4rev1)
        const STATUS = 1 << 1;
        /// ACL extension (RFC 4314)
        const ACL = 1 << 2;
        /// QUOTA extension (RFC 2087)
        const QUOTA = 1 << 3;
        /// LITERAL+ (RFC 7888)
        const LITERAL_PLUS = 1 << 4;
        /// LITERAL- (RFC 7888)
        const LITERAL_MINUS = 1 << 5;
        /// IDLE (RFC 2177)
        const IDLE = 1 << 6;
        /// NAMESPACE (RFC 2342)
        const NAMESPACE = 1 << 7;
        /// ID (RFC 2971)
        const ID = 1 << 8;
        /// CHILDREN (RFC 3348)
        const CHILDREN = 1 << 9;
        /// LOGINDISABLED
        const LOGINDISABLED = 1 << 10;
        /// STARTTLS
        const STARTTLS = 1 << 11;
        /// MULTIAPPEND (RFC 3502)
        const MULTIAPPEND = 1 << 12;
        /// BINARY (RFC 3516)
        const BINARY = 1 << 13;
        /// UNSELECT (RFC 3691)
        const UNSELECT = 1 << 14;
        /// UIDPLUS (RFC 4315)
        const UIDPLUS = 1 << 15;
        /// CATENATE (RFC 4469)
        const CATENATE = 1 << 16;
        /// CONDSTORE (RFC 7162)
        const CONDSTORE = 1 << 17;
        /// ESEARCH (RFC 4731)
        const ESEARCH = 1 << 18;
        /// SASL-IR (RFC 4959)
        const SASL_IR = 1 << 19;
        /// COMPRESS (RFC 4978)
        const COMPRESS = 1 << 20;
        /// WITHIN (RFC 5032)
        const WITHIN = 1 << 21;
        /// ENABLE (RFC 5161)
        const ENABLE = 1 << 22;
        /// QRESYNC (RFC 7162)
        const QRESYNC = 1 << 23;
        /// SEARCHRES (RFC 5182)
        const SEARCHRES = 1 << 24;
        /// SORT (RFC 5256)
        const SORT = 1 << 25;
        /// LIST-EXTENDED (RFC 5258)
        const LIST_EXTENDED = 1 << 26;
        /// CONVERT (RFC 5259)
        const CONVERT = 1 << 27;
        /// LANGUAGE (RFC 5255)
        const LANGUAGE = 1 << 28;
        /// I18NLEVEL (RFC 5255)
        const I18NLEVEL = 1 << 29;
        /// ESORT (RFC 5267)
        const ESORT = 1 << 30;
        /// CONTEXT (RFC 5267/6237)
        const CONTEXT = 1 << 31;
        /// METADATA (RFC 5464)
        const METADATA = 1 << 32;
        /// NOTIFY (RFC 5465)
        const NOTIFY = 1 << 33;
        /// FILTERS (RFC 5466)
        const FILTERS = 1 << 34;
        /// LIST-STATUS (RFC 5819)
        const LIST_STATUS = 1 << 35;
        /// SORT=DISPLAY (RFC 5957)
        const SORT_DISPLAY = 1 << 36;
        /// CREATE-SPECIAL-USE (RFC 6154)
        const CREATE_SPECIAL_USE = 1 << 37;
        /// SPECIAL-USE (RFC 6154)
        const SPECIAL_USE = 1 << 38;
        /// SEARCH=FUZZY (RFC 6203)
        const SEARCH_FUZZY = 1 << 39;
        /// MULTISEARCH (RFC 6237)
        const MULTISEARCH = 1 << 40;
        /// MOVE (RFC 6851)
        const MOVE = 1 << 41;
        /// UTF8=ACCEPT (RFC 6855)
        const UTF8_ACCEPT = 1 << 42;
        /// UTF8=ONLY (RFC 6855)
        const UTF8_ONLY = 1 << 43;
        /// APPENDLIMIT (RFC 7889)
        const APPENDLIMIT = 1 << 44;
        /// XLIST (deprecated GMail extension)
        const XLIST = 1 << 45;
        /// X-GM-EXT-1 (GMail extension: labels, msgid, thrid)
        const X_GM_EXT_1 = 1 << 46;
    }
}

impl Capability {
    /// Maps a bare (non-prefixed) capability atom to its flag bit.
    ///
    /// Returns `None` for atoms that are unrecognized or carry a value via a
    /// prefix (`AUTH=`, `APPENDLIMIT=`, ...) and so are handled separately by
    /// [`CapabilitySet::apply_atom`].
    #[must_use]
    pub fn from_atom(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "IMAP4REV1" => Some(Self::IMAP4REV1),
            "STATUS" => Some(Self::STATUS),
            "ACL" => Some(Self::ACL),
            "QUOTA" => Some(Self::QUOTA),
            "LITERAL+" => Some(Self::LITERAL_PLUS),
            "LITERAL-" => Some(Self::LITERAL_MINUS),
            "IDLE" => Some(Self::IDLE),
            "NAMESPACE" => Some(Self::NAMESPACE),
            "ID" => Some(Self::ID),
            "CHILDREN" => Some(Self::CHILDREN),
            "LOGINDISABLED" => Some(Self::LOGINDISABLED),
            "STARTTLS" => Some(Self::STARTTLS),
            "MULTIAPPEND" => Some(Self::MULTIAPPEND),
            "BINARY" => Some(Self::BINARY),
            "UNSELECT" => Some(Self::UNSELECT),
            "UIDPLUS" => Some(Self::UIDPLUS),
            "CATENATE" => Some(Self::CATENATE),
            "CONDSTORE" => Some(Self::CONDSTORE),
            "ESEARCH" => Some(Self::ESEARCH),
            "SASL-IR" => Some(Self::SASL_IR),
            "WITHIN" => Some(Self::WITHIN),
            "ENABLE" => Some(Self::ENABLE),
            "QRESYNC" => Some(Self::QRESYNC),
            "SEARCHRES" => Some(Self::SEARCHRES),
            "SORT" => Some(Self::SORT),
            "LIST-EXTENDED" => Some(Self::LIST_EXTENDED),
            "CONVERT" => Some(Self::CONVERT),
            "LANGUAGE" => Some(Self::LANGUAGE),
            "ESORT" => Some(Self::ESORT),
            "CONTEXT" => Some(Self::CONTEXT),
            "METADATA" => Some(Self::METADATA),
            "NOTIFY" => Some(Self::NOTIFY),
            "FILTERS" => Some(Self::FILTERS),
            "LIST-STATUS" => Some(Self::LIST_STATUS),
            "SORT=DISPLAY" => Some(Self::SORT_DISPLAY),
            "CREATE-SPECIAL-USE" => Some(Self::CREATE_SPECIAL_USE),
            "SPECIAL-USE" => Some(Self::SPECIAL_USE),
            "SEARCH=FUZZY" => Some(Self::SEARCH_FUZZY),
            "MULTISEARCH" => Some(Self::MULTISEARCH),
            "MOVE" => Some(Self::MOVE),
            "UTF8=ACCEPT" => Some(Self::UTF8_ACCEPT),
            "UTF8=ONLY" => Some(Self::UTF8_ONLY),
            "XLIST" => Some(Self::XLIST),
            "X-GM-EXT-1" => Some(Self::X_GM_EXT_1),
            _ => None,
        }
    }
}

/// Threading algorithm advertised via a `THREAD=` capability atom (RFC 5256).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ThreadingAlgorithm {
    /// THREAD=ORDEREDSUBJECT
    OrderedSubject,
    /// THREAD=REFERENCES
    References,
    /// Unrecognized algorithm name, kept verbatim.
    Unknown(String),
}

impl ThreadingAlgorithm {
    fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "ORDEREDSUBJECT" => Self::OrderedSubject,
            "REFERENCES" => Self::References,
            _ => Self::Unknown(s.to_string()),
        }
    }
}

/// Additional `METADATA` server-response-code detail (used by `ResponseCode::Metadata`,
/// not by capability negotiation itself, but the parsing is grounded here).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataCode {
    /// LONGENTRIES: size in octets of the longest value that didn't fit.
    LongEntries(u32),
    /// MAXSIZE: server-imposed cap on entry value size.
    MaxSize(u32),
    /// TOOMANY: too many entries requested.
    TooMany,
    /// NOPRIVATE: this server has no private annotations.
    NoPrivate,
}

/// Full set of capabilities learned from a CAPABILITY response, including the
/// side-channel values that a single bitflag bit can't carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilitySet {
    /// The packed bitset of recognized, non-valued capabilities.
    pub flags: Capability,
    /// SASL mechanism names from `AUTH=<mech>` atoms.
    pub auth_mechanisms: HashSet<String>,
    /// Compression algorithm names from `COMPRESS=<alg>` atoms.
    pub compression_algorithms: HashSet<String>,
    /// Threading algorithms from `THREAD=<algo>` atoms.
    pub threading_algorithms: HashSet<ThreadingAlgorithm>,
    /// Charsets the server accepts for SEARCH, defaulting to `UTF-8`.
    pub supported_charsets: HashSet<String>,
    /// Maximum message size accepted by APPEND, from `APPENDLIMIT=<n>`.
    pub append_limit: Option<u32>,
    /// Internationalization level, from `I18NLEVEL=<n>`.
    pub i18n_level: i32,
    /// Raw rights string from `RIGHTS=<str>` (RFC 4314 ACL rights extension).
    pub acl_rights: Option<String>,
    /// Context name from `CONTEXT=<ctx>`.
    pub context: Option<String>,
    /// Monotonic counter bumped each time this set is rebuilt from a fresh
    /// CAPABILITY response, so callers can detect staleness cheaply.
    pub capabilities_version: u32,
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self {
            flags: Capability::empty(),
            auth_mechanisms: HashSet::new(),
            compression_algorithms: HashSet::new(),
            threading_algorithms: HashSet::new(),
            supported_charsets: HashSet::from(["UTF-8".to_string()]),
            append_limit: None,
            i18n_level: 0,
            acl_rights: None,
            context: None,
            capabilities_version: 0,
        }
    }
}

impl CapabilitySet {
    /// Builds a capability set from the atoms of a CAPABILITY response or
    /// untagged CAPABILITY response code.
    #[must_use]
    pub fn from_atoms<'a>(atoms: impl IntoIterator<Item = &'a str>) -> Self {
        let mut set = Self::default();
        for atom in atoms {
            set.apply_atom(atom);
        }
        set.apply_derived_rules();
        set.capabilities_version = 1;
        set
    }

    /// Applies a single capability atom, routing valued (`PREFIX=value`)
    /// atoms to their side channel and bare atoms to the bit set.
    pub fn apply_atom(&mut self, atom: &str) {
        let upper = atom.to_ascii_uppercase();
        if let Some(mech) = upper.strip_prefix("AUTH=") {
            self.auth_mechanisms.insert(mech.to_string());
            return;
        }
        if let Some(n) = upper.strip_prefix("APPENDLIMIT=") {
            self.flags |= Capability::APPENDLIMIT;
            self.append_limit = n.parse().ok();
            return;
        }
        if let Some(alg) = upper.strip_prefix("COMPRESS=") {
            self.flags |= Capability::COMPRESS;
            self.compression_algorithms.insert(alg.to_string());
            return;
        }
        if let Some(ctx) = upper.strip_prefix("CONTEXT=") {
            self.flags |= Capability::CONTEXT;
            self.context = Some(ctx.to_string());
            return;
        }
        if let Some(n) = upper.strip_prefix("I18NLEVEL=") {
            self.flags |= Capability::I18NLEVEL;
            self.i18n_level = n.parse().unwrap_or(0);
            return;
        }
        if let Some(rights) = upper.strip_prefix("RIGHTS=") {
            self.acl_rights = Some(rights.to_string());
            return;
        }
        if let Some(algo) = upper.strip_prefix("THREAD=") {
            self.threading_algorithms.insert(ThreadingAlgorithm::parse(algo));
            return;
        }
        if upper == "X-GM-EXT-1" {
            self.flags |= Capability::X_GM_EXT_1;
            return;
        }
        if let Some(bit) = Capability::from_atom(atom) {
            self.flags |= bit;
        }
    }

    /// Applies implication rules that hold regardless of what the server
    /// actually advertised (IMAP4rev1 implies STATUS, and so on).
    fn apply_derived_rules(&mut self) {
        if self.flags.contains(Capability::IMAP4REV1) {
            self.flags |= Capability::STATUS;
        }
        if self.flags.contains(Capability::QRESYNC) {
            self.flags |= Capability::CONDSTORE;
        }
        if self.flags.contains(Capability::UTF8_ONLY) {
            self.flags |= Capability::UTF8_ACCEPT;
        }
    }

    /// Returns true if the given bit is set.
    #[must_use]
    pub fn supports(&self, cap: Capability) -> bool {
        self.flags.contains(cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod status_tests {
        use super::*;

        #[test]
        fn is_ok_for_ok() {
            assert!(Status::Ok.is_ok());
        }

        #[test]
        fn is_ok_for_preauth() {
            assert!(Status::PreAuth.is_ok());
        }

        #[test]
        fn is_ok_false_for_no() {
            assert!(!Status::No.is_ok());
        }

        #[test]
        fn is_ok_false_for_bad() {
            assert!(!Status::Bad.is_ok());
        }

        #[test]
        fn is_ok_false_for_bye() {
            assert!(!Status::Bye.is_ok());
        }
    }

    mod capability_parse_tests {
        use super::*;

        #[test]
        fn parse_bare_atoms() {
            assert_eq!(Capability::from_atom("IMAP4rev1"), Some(Capability::IMAP4REV1));
            assert_eq!(Capability::from_atom("idle"), Some(Capability::IDLE));
            assert_eq!(Capability::from_atom("QRESYNC"), Some(Capability::QRESYNC));
            assert_eq!(Capability::from_atom("BOGUS"), None);
        }
    }

    mod capability_set_tests {
        use super::*;

        #[test]
        fn default_has_utf8_charset() {
            let set = CapabilitySet::default();
            assert!(set.supported_charsets.contains("UTF-8"));
            assert_eq!(set.capabilities_version, 0);
        }

        #[test]
        fn from_atoms_sets_bits_and_version() {
            let set = CapabilitySet::from_atoms(["IMAP4REV1", "IDLE", "UIDPLUS"]);
            assert!(set.supports(Capability::IMAP4REV1));
            assert!(set.supports(Capability::IDLE));
            assert!(set.supports(Capability::UIDPLUS));
            assert_eq!(set.capabilities_version, 1);
        }

        #[test]
        fn imap4rev1_implies_status() {
            let set = CapabilitySet::from_atoms(["IMAP4REV1"]);
            assert!(set.supports(Capability::STATUS));
        }

        #[test]
        fn qresync_implies_condstore() {
            let set = CapabilitySet::from_atoms(["QRESYNC"]);
            assert!(set.supports(Capability::CONDSTORE));
        }

        #[test]
        fn utf8_only_implies_utf8_accept() {
            let set = CapabilitySet::from_atoms(["UTF8=ONLY"]);
            assert!(set.supports(Capability::UTF8_ACCEPT));
        }

        #[test]
        fn auth_mechanisms_collected() {
            let set = CapabilitySet::from_atoms(["AUTH=PLAIN", "AUTH=XOAUTH2"]);
            assert!(set.auth_mechanisms.contains("PLAIN"));
            assert!(set.auth_mechanisms.contains("XOAUTH2"));
        }

        #[test]
        fn appendlimit_parsed() {
            let set = CapabilitySet::from_atoms(["APPENDLIMIT=35651584"]);
            assert!(set.supports(Capability::APPENDLIMIT));
            assert_eq!(set.append_limit, Some(35_651_584));
        }

        #[test]
        fn gmail_ext_recognized() {
            let set = CapabilitySet::from_atoms(["X-GM-EXT-1"]);
            assert!(set.supports(Capability::X_GM_EXT_1));
        }

        #[test]
        fn thread_algorithms_collected() {
            let set = CapabilitySet::from_atoms(["THREAD=REFERENCES", "THREAD=ORDEREDSUBJECT"]);
            assert!(set
                .threading_algorithms
                .contains(&ThreadingAlgorithm::References));
            assert!(set
                .threading_algorithms
                .contains(&ThreadingAlgorithm::OrderedSubject));
        }
    }
}
