use crate::f;

/// Extends primitives with more specific formatting options
pub trait ValueExt {
    /// Consistent scientific number formatting
    ///
    /// Voxel intensities range from raw detector counts to normalised floats
    /// around zero, so a fixed width with a signed and padded exponent keeps
    /// tables aligned.
    ///
    /// Works for anything that implements `LowerExp`.
    ///
    /// ```rust
    /// # use tomokit_utils::ValueExt;
    /// assert_eq!((-0.25).sci(3, 2), "-2.500e-01".to_string());
    /// assert_eq!(14.08.sci(2, 2), "1.41e+01".to_string());
    /// assert_eq!(300.sci(1, 3), "3.0e+002".to_string());
    /// assert_eq!(f64::NAN.sci(2, 2), "NaN".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: std::fmt::LowerExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let mut num = f!("{:.precision$e}", &self, precision = precision);
        // non-finite values have no exponent to pad
        let Some(idx) = num.find('e') else {
            return num;
        };
        let exp = num.split_off(idx);
        let (sign, exp) = match exp.strip_prefix("e-") {
            Some(exp) => ('-', exp),
            None => ('+', &exp[1..]),
        };
        num.push_str(&f!("e{}{:0>pad$}", sign, exp, pad = exp_pad));
        num
    }
}

/// Extends 3D coordinates with display formatting
pub trait CoordinateExt {
    /// Format an (x, y, z) coordinate with a fixed number of decimal places
    ///
    /// ```rust
    /// # use tomokit_utils::CoordinateExt;
    /// assert_eq!([1.0, 2.5, -3.25].display_xyz(2), "(1.00, 2.50, -3.25)");
    /// ```
    fn display_xyz(&self, precision: usize) -> String;
}

impl<T: std::fmt::Display> CoordinateExt for [T; 3] {
    fn display_xyz(&self, precision: usize) -> String {
        f!(
            "({:.p$}, {:.p$}, {:.p$})",
            self[0],
            self[1],
            self[2],
            p = precision
        )
    }
}
