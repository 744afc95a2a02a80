use std::io::Write;
use std::path::Path;

use keygen::KeyMaterial;
use log::info;
use pkcs::pkcs1::{RSAPrivateKey, RSAPublicKey};
use rand::rngs::OsRng;

use crate::error::Result;
use crate::utils::write_output;

pub(crate) const PRIVATE_KEY_FILE: &str = "tbprivate.der";
pub(crate) const PUBLIC_KEY_FILE: &str = "tbpublic.der";

/// Generates one key pair, prints it and writes both DER files into the
/// working directory.
pub(crate) fn execute(bits: u64) -> Result<()> {
    let key = keygen::generate(bits, &mut OsRng)?;
    report(&key, &mut std::io::stdout().lock())?;
    write_key_files(&key, Path::new("."))
}

fn report<W: Write>(key: &KeyMaterial, out: &mut W) -> Result<()> {
    writeln!(out, "RESULTS:")?;
    writeln!(out, "Prime 1: 0x{:x}", key.prime1())?;
    writeln!(out, "Prime 2: 0x{:x}", key.prime2())?;
    writeln!(out, "Public Modulus   N: 0x{:x}", key.modulus())?;
    writeln!(out, "Public Exponent  E: 0x{:x}", key.public_exponent())?;
    writeln!(out, "Private Exponent D: 0x{:x}", key.private_exponent())?;
    Ok(())
}

fn write_key_files(key: &KeyMaterial, dir: &Path) -> Result<()> {
    let private_der = RSAPrivateKey::from(key).to_der()?;
    let public_der = RSAPublicKey::from(key).to_der()?;
    write_output(&dir.join(PRIVATE_KEY_FILE), &private_der)?;
    write_output(&dir.join(PUBLIC_KEY_FILE), &public_der)?;
    info!("{}-bit key pair written", key.bits());
    Ok(())
}

#[cfg(test)]
mod tests {
    use keygen::KeyMaterial;
    use num_bigint::BigUint;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::{PRIVATE_KEY_FILE, PUBLIC_KEY_FILE, report, write_key_files};

    fn textbook_key() -> KeyMaterial {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        keygen::from_primes_and_exponent(
            BigUint::from(61u32),
            BigUint::from(53u32),
            BigUint::from(17u32),
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn test_report() {
        let mut out = Vec::new();
        report(&textbook_key(), &mut out).unwrap();
        assert_eq!(
            "RESULTS:\n\
             Prime 1: 0x3d\n\
             Prime 2: 0x35\n\
             Public Modulus   N: 0xca1\n\
             Public Exponent  E: 0x11\n\
             Private Exponent D: 0xac1\n",
            String::from_utf8(out).unwrap()
        );
    }

    #[test]
    fn test_write_key_files() {
        let dir = tempfile::tempdir().unwrap();
        write_key_files(&textbook_key(), dir.path()).unwrap();

        let private = std::fs::read(dir.path().join(PRIVATE_KEY_FILE)).unwrap();
        let public = std::fs::read(dir.path().join(PUBLIC_KEY_FILE)).unwrap();
        assert_eq!(31, private.len());
        assert_eq!(
            vec![0x30, 0x07, 0x02, 0x02, 0x0c, 0xa1, 0x02, 0x01, 0x11],
            public
        );
    }
}
