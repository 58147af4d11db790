use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies with their decimal precision rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Qatari Riyal (2 decimal places)
    #[default]
    QAR,
    /// Saudi Riyal (2 decimal places)
    SAR,
    /// Kuwaiti Dinar (3 decimal places)
    KWD,
    /// US Dollar (2 decimal places)
    USD,
}

impl Currency {
    /// Returns the decimal scale for this currency
    pub fn scale(&self) -> u32 {
        match self {
            Currency::KWD => 3,
            Currency::QAR | Currency::SAR | Currency::USD => 2,
        }
    }

    /// Rounds a decimal value to the appropriate scale for this currency
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp(self.scale())
    }

    /// Validates that a decimal value has the correct scale for this currency
    pub fn validate_amount(&self, amount: Decimal) -> Result<(), String> {
        let scale = amount.normalize().scale();
        let expected_scale = self.scale();

        if scale > expected_scale {
            return Err(format!(
                "{} amounts must have at most {} decimal places, got {}",
                self, expected_scale, scale
            ));
        }

        if amount < Decimal::ZERO {
            return Err(format!("{} amount cannot be negative", self));
        }

        Ok(())
    }

    /// Arabic currency name used in printed documents
    pub fn arabic_name(&self) -> &'static str {
        match self {
            Currency::QAR => "ريال قطري",
            Currency::SAR => "ريال سعودي",
            Currency::KWD => "دينار كويتي",
            Currency::USD => "دولار أمريكي",
        }
    }

    /// Formats an amount with thousands separators at the currency scale,
    /// e.g. `12,500.00`. Printed documents use this without the code.
    pub fn format_grouped(&self, amount: Decimal) -> String {
        let rounded = self.round(amount);
        let text = format!("{:.*}", self.scale() as usize, rounded.abs());
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i.to_string(), Some(f.to_string())),
            None => (text.clone(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if rounded < Decimal::ZERO { "-" } else { "" };
        match frac_part {
            Some(frac) => format!("{}{}.{}", sign, grouped, frac),
            None => format!("{}{}", sign, grouped),
        }
    }

    /// Formats an amount for display with the currency code
    pub fn format_amount(&self, amount: Decimal) -> String {
        format!("{} {}", self, self.format_grouped(amount))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::QAR => write!(f, "QAR"),
            Currency::SAR => write!(f, "SAR"),
            Currency::KWD => write!(f, "KWD"),
            Currency::USD => write!(f, "USD"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "QAR" => Ok(Currency::QAR),
            "SAR" => Ok(Currency::SAR),
            "KWD" => Ok(Currency::KWD),
            "USD" => Ok(Currency::USD),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
