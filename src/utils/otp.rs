use rand::Rng;

pub const OTP_TTL_MINUTES: i64 = 10;

/// Six decimal digits, never starting with zero.
pub fn generate_otp() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_is_six_digits() {
        for _ in 0..100 {
            let code = generate_otp();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            let value: u32 = code.parse().unwrap();
            assert!((100_000..1_000_000).contains(&value));
        }
    }
}
