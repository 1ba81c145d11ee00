//! Signal columns and the indicator groups that present them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::categorical::UnknownCode;

/// One of the fixed numeric signal columns carried by every observation.
///
/// Declaration order is the canonical column order, which is also the axis
/// order of the correlation heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalColumn {
    CrusherSoybeanInventory,
    PortSoybeanInventory,
    SpotCrushMargin,
    FuturesCrushMargin,
    MealBasis,
    MealWarrants,
    MealInventory,
    MealRapeseedSpread,
    HogInventory,
    IntradayMomentum,
    DualMa,
    MedianDualMa,
    KaufmanAma,
    Cci,
    Trix,
    Bollinger,
    VolatilityTrend,
    Chaikin,
}

impl SignalColumn {
    pub const COUNT: usize = 18;

    pub const ALL: [SignalColumn; Self::COUNT] = [
        SignalColumn::CrusherSoybeanInventory,
        SignalColumn::PortSoybeanInventory,
        SignalColumn::SpotCrushMargin,
        SignalColumn::FuturesCrushMargin,
        SignalColumn::MealBasis,
        SignalColumn::MealWarrants,
        SignalColumn::MealInventory,
        SignalColumn::MealRapeseedSpread,
        SignalColumn::HogInventory,
        SignalColumn::IntradayMomentum,
        SignalColumn::DualMa,
        SignalColumn::MedianDualMa,
        SignalColumn::KaufmanAma,
        SignalColumn::Cci,
        SignalColumn::Trix,
        SignalColumn::Bollinger,
        SignalColumn::VolatilityTrend,
        SignalColumn::Chaikin,
    ];

    /// Position of this column in [`SignalColumn::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Machine key, used for CSV headers and JSON.
    pub fn key(self) -> &'static str {
        match self {
            SignalColumn::CrusherSoybeanInventory => "crusher_soybean_inventory",
            SignalColumn::PortSoybeanInventory => "port_soybean_inventory",
            SignalColumn::SpotCrushMargin => "spot_crush_margin",
            SignalColumn::FuturesCrushMargin => "futures_crush_margin",
            SignalColumn::MealBasis => "meal_basis",
            SignalColumn::MealWarrants => "meal_warrants",
            SignalColumn::MealInventory => "meal_inventory",
            SignalColumn::MealRapeseedSpread => "meal_rapeseed_spread",
            SignalColumn::HogInventory => "hog_inventory",
            SignalColumn::IntradayMomentum => "intraday_momentum",
            SignalColumn::DualMa => "dual_ma",
            SignalColumn::MedianDualMa => "median_dual_ma",
            SignalColumn::KaufmanAma => "kaufman_ama",
            SignalColumn::Cci => "cci",
            SignalColumn::Trix => "trix",
            SignalColumn::Bollinger => "bollinger",
            SignalColumn::VolatilityTrend => "volatility_trend",
            SignalColumn::Chaikin => "chaikin",
        }
    }

    /// Human-readable name used for series and heatmap labels.
    pub fn label(self) -> &'static str {
        match self {
            SignalColumn::CrusherSoybeanInventory => "Crusher soybean inventory",
            SignalColumn::PortSoybeanInventory => "Port soybean inventory",
            SignalColumn::SpotCrushMargin => "Spot crush margin",
            SignalColumn::FuturesCrushMargin => "Futures crush margin",
            SignalColumn::MealBasis => "Meal basis",
            SignalColumn::MealWarrants => "Meal warrants",
            SignalColumn::MealInventory => "Meal inventory",
            SignalColumn::MealRapeseedSpread => "Meal/rapeseed spread",
            SignalColumn::HogInventory => "Hog inventory",
            SignalColumn::IntradayMomentum => "Intraday momentum",
            SignalColumn::DualMa => "Dual MA",
            SignalColumn::MedianDualMa => "Median dual MA",
            SignalColumn::KaufmanAma => "Kaufman AMA",
            SignalColumn::Cci => "CCI",
            SignalColumn::Trix => "TRIX",
            SignalColumn::Bollinger => "Bollinger",
            SignalColumn::VolatilityTrend => "Volatility trend",
            SignalColumn::Chaikin => "Chaikin",
        }
    }

    /// Header used by the original spreadsheet export.
    pub fn source_header(self) -> &'static str {
        match self {
            SignalColumn::CrusherSoybeanInventory => "中国大豆压榨企业原料大豆库存",
            SignalColumn::PortSoybeanInventory => "大豆港口库存",
            SignalColumn::SpotCrushMargin => "大豆现货压榨利润",
            SignalColumn::FuturesCrushMargin => "大豆压榨盘面利润",
            SignalColumn::MealBasis => "豆粕基差",
            SignalColumn::MealWarrants => "豆粕仓单",
            SignalColumn::MealInventory => "豆粕库存",
            SignalColumn::MealRapeseedSpread => "豆菜价差",
            SignalColumn::HogInventory => "生猪存栏",
            SignalColumn::IntradayMomentum => "日内动量",
            SignalColumn::DualMa => "双均线",
            SignalColumn::MedianDualMa => "中值双均线",
            SignalColumn::KaufmanAma => "考夫曼均线",
            SignalColumn::Cci => "顺势指标CCI",
            SignalColumn::Trix => "TRIX指标",
            SignalColumn::Bollinger => "布林带",
            SignalColumn::VolatilityTrend => "波动趋势",
            SignalColumn::Chaikin => "佳庆指标",
        }
    }

    pub fn group(self) -> IndicatorGroup {
        match self {
            SignalColumn::CrusherSoybeanInventory
            | SignalColumn::PortSoybeanInventory
            | SignalColumn::SpotCrushMargin
            | SignalColumn::FuturesCrushMargin
            | SignalColumn::MealBasis
            | SignalColumn::MealWarrants
            | SignalColumn::MealInventory
            | SignalColumn::MealRapeseedSpread
            | SignalColumn::HogInventory => IndicatorGroup::Fundamental,
            SignalColumn::DualMa
            | SignalColumn::MedianDualMa
            | SignalColumn::KaufmanAma
            | SignalColumn::Trix => IndicatorGroup::Trend,
            SignalColumn::Cci | SignalColumn::Bollinger | SignalColumn::IntradayMomentum => {
                IndicatorGroup::Oscillator
            }
            SignalColumn::Chaikin | SignalColumn::VolatilityTrend => IndicatorGroup::Volume,
        }
    }
}

impl fmt::Display for SignalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SignalColumn {
    type Err = UnknownCode;

    /// Accepts the machine key, the display label or the source header.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SignalColumn::ALL
            .into_iter()
            .find(|c| c.key() == s || c.label() == s || c.source_header() == s)
            .ok_or_else(|| UnknownCode {
                kind: "signal column",
                code: s.to_string(),
            })
    }
}

/// The four indicator-group panels. They differ only in the signal columns
/// they offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorGroup {
    Fundamental,
    Trend,
    Oscillator,
    Volume,
}

impl IndicatorGroup {
    pub const ALL: [IndicatorGroup; 4] = [
        IndicatorGroup::Fundamental,
        IndicatorGroup::Trend,
        IndicatorGroup::Oscillator,
        IndicatorGroup::Volume,
    ];

    /// Columns offered by this group, in the order the panel lists them.
    pub fn columns(self) -> &'static [SignalColumn] {
        match self {
            IndicatorGroup::Fundamental => &[
                SignalColumn::CrusherSoybeanInventory,
                SignalColumn::PortSoybeanInventory,
                SignalColumn::SpotCrushMargin,
                SignalColumn::FuturesCrushMargin,
                SignalColumn::MealBasis,
                SignalColumn::MealWarrants,
                SignalColumn::MealInventory,
                SignalColumn::MealRapeseedSpread,
                SignalColumn::HogInventory,
            ],
            IndicatorGroup::Trend => &[
                SignalColumn::DualMa,
                SignalColumn::MedianDualMa,
                SignalColumn::KaufmanAma,
                SignalColumn::Trix,
            ],
            IndicatorGroup::Oscillator => &[
                SignalColumn::Cci,
                SignalColumn::Bollinger,
                SignalColumn::IntradayMomentum,
            ],
            IndicatorGroup::Volume => &[SignalColumn::Chaikin, SignalColumn::VolatilityTrend],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            IndicatorGroup::Fundamental => "Fundamental signals",
            IndicatorGroup::Trend => "Trend indicators",
            IndicatorGroup::Oscillator => "Oscillators",
            IndicatorGroup::Volume => "Volume indicators",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            IndicatorGroup::Fundamental => "fundamental",
            IndicatorGroup::Trend => "trend",
            IndicatorGroup::Oscillator => "oscillator",
            IndicatorGroup::Volume => "volume",
        }
    }
}

impl FromStr for IndicatorGroup {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndicatorGroup::ALL
            .into_iter()
            .find(|g| g.key() == s.trim())
            .ok_or_else(|| UnknownCode {
                kind: "indicator group",
                code: s.to_string(),
            })
    }
}
