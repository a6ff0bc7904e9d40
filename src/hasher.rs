use crate::error::{Error, Result};
use digest::DynDigest;
use sha1::Sha1;
use std::{
    fmt, fs,
    io::{self, Read},
    path::Path,
};

/// HashBox is a Box<[u8]> digest output that renders as lowercase hex.
struct HashBox(Box<[u8]>);

impl fmt::LowerHex for HashBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for HashBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

/// Returns the fingerprint of a byte slice.
///
/// The fingerprint is the SHA-1 digest of `bytes` as a 40 character lowercase
/// hexadecimal string. It is only ever compared for equality between a source
/// file and its installed copy.
///
/// # Example
///
/// ```rust
/// use conjure_dotfiles::hasher::fingerprint;
///
/// assert_eq!(
///     fingerprint(b"test string"),
///     "661295c9cbf9d6b2f6428414504a8deed3020641"
/// );
/// ```
pub fn fingerprint(bytes: &[u8]) -> String {
    get_digest(bytes, &mut Sha1::default())
}

/// Returns the fingerprint of the file at `path`, reading it in chunks.
///
/// The result is identical to calling [`fingerprint`] on the whole file
/// contents.
///
/// # Errors
///
/// Returns [`Error::Io`] naming `path` when the file cannot be opened or read.
pub fn file_fingerprint<P>(path: P) -> Result<String>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut file = fs::File::open(path).map_err(|e| Error::io("reading", path, e))?;

    get_reader_hash(&mut file, &mut Sha1::default()).map_err(|e| Error::io("reading", path, e))
}

/// Hashes a single buffer with the provided hasher and resets it.
pub fn get_digest<Hasher>(bytes: &[u8], hash: &mut Hasher) -> String
where
    Hasher: DynDigest + ?Sized,
{
    hash.update(bytes);
    HashBox(hash.finalize_reset()).to_string()
}

fn get_reader_hash<R, Hasher>(reader: &mut R, hash: &mut Hasher) -> io::Result<String>
where
    R: Read,
    Hasher: DynDigest + ?Sized,
{
    let mut buf = [0u8; 4096];

    loop {
        let i = match reader.read(&mut buf) {
            Ok(i) => i,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        if i == 0 {
            return Ok(HashBox(hash.finalize_reset()).to_string());
        }
        hash.update(&buf[..i]);
    }
}
