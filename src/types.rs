use fixed::types::I32F32;

// Millimeters in document space. Fixed-point with milli-unit rounding so
// break planning is deterministic across platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mm(I32F32);

impl Mm {
    pub const ZERO: Mm = Mm(I32F32::from_bits(0));

    pub fn from_f32(value: f32) -> Mm {
        if !value.is_finite() {
            return Mm::ZERO;
        }
        let milli = (value as f64 * 1000.0).round();
        let milli = milli.clamp(i64::MIN as f64, i64::MAX as f64) as i64;
        Mm::from_milli_i64(milli)
    }

    pub fn from_i32(value: i32) -> Mm {
        Mm::from_milli_i64((value as i64) * 1000)
    }

    pub fn to_f32(self) -> f32 {
        self.0.to_num()
    }

    pub fn to_milli_i64(self) -> i64 {
        let bits = self.0.to_bits() as i128;
        let denom = 1i128 << 32;
        let scaled = bits * 1000;
        let adj = if scaled >= 0 { denom / 2 } else { -denom / 2 };
        let milli = (scaled + adj) / denom;
        milli.clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }

    pub fn from_milli_i64(milli: i64) -> Mm {
        Mm::from_milli_i128(milli as i128)
    }

    fn from_milli_i128(milli: i128) -> Mm {
        let denom = 1i128 << 32;
        let adj = if milli >= 0 { 500 } else { -500 };
        let bits = (milli * denom + adj) / 1000;
        let bits = bits.clamp(i64::MIN as i128, i64::MAX as i128) as i64;
        Mm(I32F32::from_bits(bits))
    }

    pub fn max(self, other: Mm) -> Mm {
        if self >= other { self } else { other }
    }

    pub fn min(self, other: Mm) -> Mm {
        if self <= other { self } else { other }
    }

    pub fn to_pt(self) -> f32 {
        self.to_f32() * 72.0 / 25.4
    }
}

impl std::ops::Add for Mm {
    type Output = Mm;
    fn add(self, rhs: Mm) -> Mm {
        Mm::from_milli_i128(self.to_milli_i64() as i128 + rhs.to_milli_i64() as i128)
    }
}

impl std::ops::AddAssign for Mm {
    fn add_assign(&mut self, rhs: Mm) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Mm {
    type Output = Mm;
    fn sub(self, rhs: Mm) -> Mm {
        Mm::from_milli_i128(self.to_milli_i64() as i128 - rhs.to_milli_i64() as i128)
    }
}

impl std::ops::SubAssign for Mm {
    fn sub_assign(&mut self, rhs: Mm) {
        *self = *self - rhs;
    }
}

impl std::ops::Mul<i32> for Mm {
    type Output = Mm;
    fn mul(self, rhs: i32) -> Mm {
        let milli = self.to_milli_i64() as i128;
        Mm::from_milli_i128(milli.saturating_mul(rhs as i128))
    }
}

impl std::ops::Mul<f32> for Mm {
    type Output = Mm;
    fn mul(self, rhs: f32) -> Mm {
        if !rhs.is_finite() {
            return Mm::ZERO;
        }
        Mm::from_f32(self.to_f32() * rhs)
    }
}

impl std::ops::Div<i32> for Mm {
    type Output = Mm;
    fn div(self, rhs: i32) -> Mm {
        if rhs == 0 {
            Mm::ZERO
        } else {
            let milli = self.to_milli_i64() as i128;
            let den = rhs as i128;
            let den_abs = den.abs();
            let value = if milli >= 0 {
                (milli + den_abs / 2) / den
            } else {
                -(((-milli) + den_abs / 2) / den)
            };
            Mm::from_milli_i128(value)
        }
    }
}

impl std::ops::Neg for Mm {
    type Output = Mm;
    fn neg(self) -> Mm {
        Mm::from_milli_i128(-(self.to_milli_i64() as i128))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

// Per-export page geometry. Page 1 reserves header_height at the top;
// every other page reserves margin. All pages reserve footer_height plus
// margin at the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width: Mm,
    pub page_height: Mm,
    pub margin: Mm,
    pub header_height: Mm,
    pub footer_height: Mm,
}

impl PageLayout {
    pub fn a4() -> Self {
        Self {
            page_width: Mm::from_f32(210.0),
            page_height: Mm::from_f32(297.0),
            margin: Mm::from_f32(10.0),
            header_height: Mm::from_f32(42.0),
            footer_height: Mm::from_f32(12.0),
        }
    }

    pub fn letter() -> Self {
        Self {
            page_width: Mm::from_f32(215.9),
            page_height: Mm::from_f32(279.4),
            margin: Mm::from_f32(10.0),
            header_height: Mm::from_f32(42.0),
            footer_height: Mm::from_f32(12.0),
        }
    }

    pub fn usable_height(&self, page_number: usize) -> Mm {
        self.page_height - self.content_top(page_number) - self.footer_height - self.margin
    }

    pub fn content_width(&self) -> Mm {
        self.page_width - self.margin * 2
    }

    pub fn content_top(&self, page_number: usize) -> Mm {
        if page_number == 1 {
            self.header_height
        } else {
            self.margin
        }
    }
}
