use base64::Engine;
use num_complex::Complex;

use crate::dispatch::Real;
use crate::model::{BytesEncoding, Options};

/// Write the shortest text that reads back to `value`, in `%g` style.
///
/// Scientific notation (`1e+06`, `1.5e-07`) is used when the decimal exponent is below -4, or at least 6.
pub(crate) fn real<F: Real>(value: F) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }

    if value.is_infinite() {
        return if value.is_sign_negative() {
            "-Inf".to_string()
        } else {
            "+Inf".to_string()
        };
    }

    // Rust's `{:e}` writes the shortest round-tripping digits, ex: `-1.25e-7`.
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => unreachable!("internal error - `{{:e}}` always writes an exponent"),
    };
    let exponent: i32 = match exponent.parse() {
        Ok(exponent) => exponent,
        Err(_) => unreachable!("internal error - `{{:e}}` writes a decimal exponent"),
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(unsigned) => ("-", unsigned),
        None => ("", mantissa),
    };

    if exponent < -4 || exponent >= 6 {
        let direction = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{mantissa}e{direction}{:02}", exponent.unsigned_abs());
    }

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("{sign}0.{zeros}{digits}")
    } else {
        let whole = exponent as usize + 1;

        if digits.len() <= whole {
            format!("{sign}{digits:0<whole$}")
        } else {
            format!("{sign}{}.{}", &digits[..whole], &digits[whole..])
        }
    }
}

pub(crate) fn complex<F: Real>(value: &Complex<F>) -> String {
    let re = real(value.re);
    let im = real(value.im);

    if im.starts_with('+') || im.starts_with('-') {
        format!("({re}{im}i)")
    } else {
        format!("({re}+{im}i)")
    }
}

pub(crate) fn bytes(value: &[u8], options: &Options) -> String {
    match options.bytes_encoding() {
        BytesEncoding::Hex => hex::encode(value),
        BytesEncoding::Base64 => base64::engine::general_purpose::STANDARD.encode(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::parse;
    use crate::model::bytes_is_base64;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0")]
    #[case(-0.0, "-0")]
    #[case(1.0, "1")]
    #[case(1.5, "1.5")]
    #[case(-2.25, "-2.25")]
    #[case(100.0, "100")]
    #[case(123456.0, "123456")]
    #[case(1234567.0, "1.234567e+06")]
    #[case(1e6, "1e+06")]
    #[case(1e21, "1e+21")]
    #[case(0.0001, "0.0001")]
    #[case(0.00012, "0.00012")]
    #[case(0.00001, "1e-05")]
    #[case(1.5e-7, "1.5e-07")]
    #[case(1e100, "1e+100")]
    #[case(0.1, "0.1")]
    #[case(f64::INFINITY, "+Inf")]
    #[case(f64::NEG_INFINITY, "-Inf")]
    #[case(f64::NAN, "NaN")]
    fn real_f64(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(real(value), expected);
    }

    #[rstest]
    #[case(0.1, "0.1")]
    #[case(3.4028235e38, "3.4028235e+38")]
    #[case(16777216.0, "1.6777216e+07")]
    fn real_f32(#[case] value: f32, #[case] expected: &str) {
        assert_eq!(real(value), expected);
    }

    #[test]
    fn real_round_trip() {
        let mut rng = thread_rng();

        for _ in 0..200 {
            let value = f64::from_bits(rng.gen());

            if value.is_nan() {
                continue;
            }

            assert_eq!(parse::real::<f64>(&real(value)).unwrap(), value);
        }

        for _ in 0..200 {
            let value: f32 = rng.gen_range(-1e9..1e9);
            assert_eq!(parse::real::<f32>(&real(value)).unwrap(), value);
        }
    }

    #[rstest]
    #[case(Complex::new(1.0, 2.0), "(1+2i)")]
    #[case(Complex::new(1.0, -2.0), "(1-2i)")]
    #[case(Complex::new(-1.5, 0.0), "(-1.5+0i)")]
    #[case(Complex::new(0.0, 1e6), "(0+1e+06i)")]
    #[case(Complex::new(1.0, f64::INFINITY), "(1+Infi)")]
    #[case(Complex::new(1.0, f64::NAN), "(1+NaNi)")]
    fn complex_f64(#[case] value: Complex<f64>, #[case] expected: &str) {
        assert_eq!(complex(&value), expected);
    }

    #[test]
    fn complex_round_trip() {
        let mut rng = thread_rng();

        for _ in 0..100 {
            let value = Complex::new(rng.gen_range(-1e3..1e3), rng.gen_range(-1e-3..1e-3));
            assert_eq!(parse::complex::<f64>(&complex(&value)).unwrap(), value);
        }
    }

    #[test]
    fn bytes_encodings() {
        assert_eq!(bytes(&[0, 255, 16], &Options::default()), "00ff10");
        assert_eq!(bytes(empty::slice(), &Options::default()), "");

        let options = Options::resolve([bytes_is_base64(true)]);
        assert_eq!(bytes(b"hello", &options), "aGVsbG8=");
    }
}
