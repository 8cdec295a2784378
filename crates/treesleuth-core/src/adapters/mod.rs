/// Content adapters — checksum and compression helpers applied by
/// consumers of the node stream.
///
/// The scanner itself never touches file *content*; these adapters are
/// the external capabilities its output can be piped through.

pub mod checksum;
pub mod compress;

pub use checksum::{crc32_digest, crc32_file};
pub use compress::{compress, Codec, CompressError};
