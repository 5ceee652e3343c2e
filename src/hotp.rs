use hmac::digest::OutputSizeUser;
use hmac::Mac;

use crate::error::{Error, Result};
use crate::options::DIGITS_RANGE;

// HOTP https://datatracker.ietf.org/doc/html/rfc4226
// HOTP(K, C) = Truncate(HMAC(K, C)) with C an 8-byte big-endian counter

// Smallest digest the truncation can index: offset <= 15, reads offset..offset+4
pub const MIN_DIGEST_LEN: usize = 20;

// `mac` is already keyed; it is cloned so the caller's instance stays untouched
pub fn code<M: Mac + Clone>(mac: &M, counter: u64, digits: u32) -> Result<String> {
    check_digits(digits)?;
    check_digest_len::<M>()?;

    Ok(code_unchecked(mac, counter, digits))
}

pub(crate) fn check_digits(digits: u32) -> Result<()> {
    if DIGITS_RANGE.contains(&digits) {
        return Ok(());
    }
    Err(Error::InvalidConfiguration(format!(
        "code length must be between {} and {} digits, got {}",
        DIGITS_RANGE.start(),
        DIGITS_RANGE.end(),
        digits
    )))
}

pub(crate) fn check_digest_len<M: Mac>() -> Result<()> {
    let digest_len = <M as OutputSizeUser>::output_size();
    if digest_len >= MIN_DIGEST_LEN {
        return Ok(());
    }
    Err(Error::InvalidConfiguration(format!(
        "keyed hash output of {} bytes is shorter than the {} bytes truncation needs",
        digest_len, MIN_DIGEST_LEN
    )))
}

// Digits and digest length were checked when the generator was built
pub(crate) fn code_unchecked<M: Mac + Clone>(mac: &M, counter: u64, digits: u32) -> String {
    debug_assert!(DIGITS_RANGE.contains(&digits));
    debug_assert!(<M as OutputSizeUser>::output_size() >= MIN_DIGEST_LEN);

    let hmac = make_hmac(mac, counter);
    format_code(truncate(&hmac, digits), digits)
}

fn make_hmac<M: Mac + Clone>(mac: &M, counter: u64) -> Vec<u8> {
    let mut mac = mac.clone();
    mac.update(&counter.to_be_bytes());
    let result = mac.finalize();

    result.into_bytes().to_vec()
}

// reduce to 4 byte string
// then s to num mod 10^Digit
fn truncate(hmac: &[u8], digits: u32) -> u32 {
    let base_code = dynamic_truncation(hmac);

    base_code % u32::pow(10, digits)
}

// Offset is the low-order 4 bits of the last digest byte, so it applies to
// SHA-1, SHA-256 and SHA-512 digests alike.
// P = String[Offset]...String[Offset+3], return the last 31 bits of P
fn dynamic_truncation(hmac: &[u8]) -> u32 {
    let offset = (hmac[hmac.len() - 1] & 0xf) as usize;
    let p = u32::from_be_bytes([
        hmac[offset],
        hmac[offset + 1],
        hmac[offset + 2],
        hmac[offset + 3],
    ]);
    p & 0x7fff_ffff
}

fn format_code(code: u32, digits: u32) -> String {
    format!("{:0width$}", code, width = digits as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::constants::*;
    use hmac::Hmac;
    use sha1::Sha1;

    type HmacSha1 = Hmac<Sha1>;

    #[test]
    fn matches_rfc_4226_vectors() {
        // RFC 4226 Appendix D
        let expected = [
            "755224", "287082", "359152", "969429", "338314", "254676", "287922", "162583",
            "399871", "520489",
        ];
        let mac = HmacSha1::new_from_slice(SHA1_KEY.as_bytes()).unwrap();

        for (counter, code_str) in expected.iter().enumerate() {
            assert_eq!(code(&mac, counter as u64, 6).unwrap(), *code_str);
        }
    }

    #[test]
    fn truncates_with_rfc_4226_example_digest() {
        // RFC 4226 section 5.4
        let digest = [
            0x1f, 0x86, 0x98, 0x69, 0x0e, 0x02, 0xca, 0x16, 0x61, 0x85, 0x50, 0xef, 0x7f, 0x19,
            0xda, 0x8e, 0x94, 0x5b, 0x55, 0x5a,
        ];

        assert_eq!(dynamic_truncation(&digest), 0x50ef7f19);
        assert_eq!(truncate(&digest, 6), 872921);
    }

    #[test]
    fn masks_the_sign_bit() {
        let mut digest = [0xffu8; 20];
        digest[19] = 0x00;

        assert_eq!(dynamic_truncation(&digest), 0x7fff_ffff);
    }

    #[test]
    fn uses_last_byte_of_longer_digests() {
        let mut digest = [0u8; 32];
        digest[31] = 0x0c;
        digest[12..16].copy_from_slice(&[0x00, 0x00, 0x30, 0x39]);

        assert_eq!(dynamic_truncation(&digest), 12345);
    }

    #[test]
    fn zero_pads_codes() {
        assert_eq!(format_code(7, 6), "000007");
        assert_eq!(format_code(81804, 6), "081804");
        assert_eq!(format_code(7081804, 8), "07081804");
    }

    #[test]
    fn leaves_the_keyed_mac_reusable() {
        let mac = HmacSha1::new_from_slice(SHA1_KEY.as_bytes()).unwrap();

        assert_eq!(code(&mac, 1, 6), code(&mac, 1, 6));
    }

    #[test]
    fn rejects_unsupported_code_lengths() {
        let mac = HmacSha1::new_from_slice(SHA1_KEY.as_bytes()).unwrap();

        for digits in [0, 5, 9, 10, 32] {
            assert!(
                matches!(code(&mac, 1, digits), Err(Error::InvalidConfiguration(_))),
                "{} digits accepted",
                digits
            );
        }
        assert_eq!(code(&mac, 1, 8).unwrap(), "94287082");
    }

    #[test]
    fn rejects_digests_too_short_to_truncate() {
        assert!(check_digest_len::<HmacSha1>().is_ok());
        assert!(matches!(
            check_digest_len::<ShortMac>(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    // 16 byte tag, the size of an HMAC-MD5
    #[derive(Clone)]
    struct ShortMac;

    impl OutputSizeUser for ShortMac {
        type OutputSize = hmac::digest::consts::U16;
    }

    impl hmac::digest::Update for ShortMac {
        fn update(&mut self, _data: &[u8]) {}
    }

    impl hmac::digest::FixedOutput for ShortMac {
        fn finalize_into(self, out: &mut hmac::digest::Output<Self>) {
            out.iter_mut().for_each(|b| *b = 0);
        }
    }

    impl hmac::digest::MacMarker for ShortMac {}

    #[test]
    fn short_digest_is_an_error_not_a_panic() {
        assert!(matches!(
            code(&ShortMac, 1, 6),
            Err(Error::InvalidConfiguration(_))
        ));
    }
}
