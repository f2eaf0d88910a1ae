use std::fmt;

pub const UNKNOWN_SIGNAL_TOOLTIP: &str = "Signal definition";

/// Visual category a status (or regime) is styled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Positive,
    Negative,
    Neutral,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Positive => "positive",
            Category::Negative => "negative",
            Category::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub tooltip: &'static str,
}

pub static SIGNALS: [SignalDescriptor; 6] = [
    SignalDescriptor {
        key: "multi_vix",
        label: "Volatility Term Structure",
        tooltip: "VXST, VIX, VXV, VXMT curve shape",
    },
    SignalDescriptor {
        key: "credit",
        label: "Credit Risk",
        tooltip: "Credit spreads vs equities",
    },
    SignalDescriptor {
        key: "nhnl",
        label: "Breadth (NH/NL)",
        tooltip: "New highs vs new lows breadth",
    },
    SignalDescriptor {
        key: "spx_vs_credit",
        label: "SPX vs Credit",
        tooltip: "Equities relative to credit risk",
    },
    SignalDescriptor {
        key: "spx_long_term",
        label: "SPX Trend",
        tooltip: "SPX vs long-term moving trend",
    },
    SignalDescriptor {
        key: "yield_curve",
        label: "Yield Curve",
        tooltip: "Slope between long and short rates",
    },
];

// Regime values share this table so the headline badge is styled like a status.
pub static STATUSES: [(&str, Category); 9] = [
    ("bullish", Category::Positive),
    ("overperforms", Category::Positive),
    ("normal", Category::Positive),
    ("risk-on", Category::Positive),
    ("bearish", Category::Negative),
    ("underperforms", Category::Negative),
    ("inverted", Category::Negative),
    ("risk-off", Category::Negative),
    ("neutral", Category::Neutral),
];

pub fn signal_descriptor(key: &str) -> Option<&'static SignalDescriptor> {
    SIGNALS.iter().find(|d| d.key == key)
}

/// Static label for `key`, or `key` itself (verbatim, not prettified).
pub fn resolve_label(key: &str) -> &str {
    signal_descriptor(key).map_or(key, |d| d.label)
}

pub fn resolve_tooltip(key: &str) -> &'static str {
    signal_descriptor(key).map_or(UNKNOWN_SIGNAL_TOOLTIP, |d| d.tooltip)
}

pub fn known_status(status: &str) -> Option<Category> {
    STATUSES
        .iter()
        .find(|(s, _)| *s == status)
        .map(|(_, category)| *category)
}

pub fn resolve_status_category(status: &str) -> Category {
    known_status(status).unwrap_or(Category::Neutral)
}

/// Hyphens become spaces, then the first character of each whitespace-delimited
/// word is upper-cased. Underscores are left alone.
pub fn prettify(raw: &str) -> String {
    let spaced = raw.replace('-', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut word_start = true;
    for c in spaced.chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}
