/// Risk weighting based on file extensions.
///
/// This is the caller-side policy the scanner stays deliberately
/// ignorant of: every node arrives with a neutral 1.0 score, and the
/// CLI scales it by the class weight below before feeding the
/// accumulator. Weights are relative, not calibrated probabilities —
/// an executable is "worth" ten documents in the total, nothing more.
use treesleuth_core::model::Node;

/// Broad risk classes for scanned files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskClass {
    /// Native executables and loadable libraries.
    Executable,
    /// Interpreted scripts and shell glue.
    Script,
    /// Archives — opaque containers that may hold anything.
    Archive,
    /// Key material and credential stores.
    Secret,
    /// Everything plainly inert: documents, media, data files.
    Inert,
}

impl RiskClass {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Executable => "Executable",
            Self::Script => "Script",
            Self::Archive => "Archive",
            Self::Secret => "Secret",
            Self::Inert => "Inert",
        }
    }

    /// Relative weight applied to a node's base risk score.
    pub fn weight(self) -> f64 {
        match self {
            Self::Executable => 10.0,
            Self::Secret => 8.0,
            Self::Script => 4.0,
            Self::Archive => 2.0,
            Self::Inert => 1.0,
        }
    }
}

/// Classify a file extension into a risk class.
///
/// Zero-heap-allocation hot path: extensions are lowercased into a
/// fixed-size stack buffer (`[u8; 12]`) rather than allocating a
/// `String`. Extensions longer than 12 bytes are treated as `Inert`.
pub fn classify_extension(ext: &str) -> RiskClass {
    let bytes = ext.as_bytes();
    if bytes.len() > 12 {
        return RiskClass::Inert;
    }

    let mut lower = [0u8; 12];
    for (dest, &src) in lower.iter_mut().zip(bytes.iter()) {
        *dest = src.to_ascii_lowercase();
    }
    let lower_str = match std::str::from_utf8(&lower[..bytes.len()]) {
        Ok(s) => s,
        Err(_) => return RiskClass::Inert,
    };

    match lower_str {
        // Executables and loadable code
        "exe" | "msi" | "dll" | "so" | "dylib" | "app" | "com" | "scr" | "bin" | "run" => {
            RiskClass::Executable
        }
        // Scripts
        "sh" | "bash" | "zsh" | "ps1" | "bat" | "cmd" | "py" | "rb" | "pl" | "js" | "vbs" => {
            RiskClass::Script
        }
        // Archives
        "zip" | "rar" | "7z" | "tar" | "gz" | "bz2" | "xz" | "zst" | "cab" | "iso" | "dmg"
        | "jar" => RiskClass::Archive,
        // Key material
        "pem" | "key" | "p12" | "pfx" | "keystore" | "jks" | "kdbx" => RiskClass::Secret,
        _ => RiskClass::Inert,
    }
}

/// Classify a node. Directories are containers, not payloads — they
/// always weigh in as `Inert`.
pub fn classify(node: &Node) -> RiskClass {
    if node.is_dir() {
        return RiskClass::Inert;
    }
    let ext = node.name.rsplit('.').next().unwrap_or("");
    classify_extension(ext)
}

/// A node's contribution to the scan's risk total: its (caller-opaque)
/// base score scaled by the class weight.
pub fn contribution(node: &Node) -> f64 {
    node.risk_score * classify(node).weight()
}
