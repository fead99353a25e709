#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use bigdecimal::{BigDecimal, Zero};

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December"
];

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct MonthlyCashFlowDto {
    pub Month: u32, //1 = January
    pub MonthName: String,
    pub Incoming: BigDecimal,
    pub Outgoing: BigDecimal
}

#[derive(serde::Deserialize, Debug, Default)]
pub struct CashFlowParams {
    pub year: Option<i32>
}

//Spreads per-month totals into a full January..December sequence. Months without activity stay at zero,
//rows with a month outside 1..=12 are ignored.
pub fn fillMonths(incoming: &[(i32, BigDecimal)], outgoing: &[(i32, BigDecimal)]) -> Vec<MonthlyCashFlowDto> {
    let mut months: Vec<MonthlyCashFlowDto> = MONTH_NAMES.iter().enumerate()
        .map(|(idx, name)| MonthlyCashFlowDto {
            Month: idx as u32 + 1,
            MonthName: name.to_string(),
            Incoming: BigDecimal::zero(),
            Outgoing: BigDecimal::zero()
        })
        .collect();

    for (month, total) in incoming {
        if let Some(entry) = slot(&mut months, *month) {
            entry.Incoming += total;
        }
    }

    for (month, total) in outgoing {
        if let Some(entry) = slot(&mut months, *month) {
            entry.Outgoing += total;
        }
    }

    return months;
}

fn slot(months: &mut [MonthlyCashFlowDto], month: i32) -> Option<&mut MonthlyCashFlowDto> {
    if !(1..=12).contains(&month) {
        return None;
    }
    return months.get_mut(month as usize - 1);
}
