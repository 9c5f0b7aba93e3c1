//! Weight-percent to atomic-percent conversion.
//!
//! Each alloy is normalised on its own: the molar quantity of every element
//! is `wt_pct / atomic_weight`, and atomic percent is that quantity as a share
//! of the alloy's molar total.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tia_core::elements::AtomicWeights;
use tia_core::errors::{ErrorInfo, TiaError};
use tracing::debug;

use crate::schema::CompositionRecord;

/// Weight and atomic fraction of one element within one alloy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementFraction {
    pub wt_pct: f64,
    pub at_pct: f64,
}

/// Element symbol to fractions, in the order the elements appear in
/// `composition.csv`.
pub type Composition = IndexMap<String, ElementFraction>;

fn composition_error(code: &str, alloy_id: &str, message: String) -> TiaError {
    TiaError::Composition(ErrorInfo::new(code, message).with_alloy(alloy_id))
}

/// Computes atomic percentages for the `(element, wt_pct)` pairs of one alloy.
pub fn atomic_percent(
    alloy_id: &str,
    elements: &[(&str, Option<f64>)],
    weights: &AtomicWeights,
) -> Result<Composition, TiaError> {
    let mut moles = Vec::with_capacity(elements.len());
    for (element, wt_pct) in elements {
        let weight = weights.require(element).map_err(|err| {
            TiaError::Composition(err.info().clone().with_alloy(alloy_id))
        })?;
        let wt_pct = wt_pct.ok_or_else(|| {
            composition_error(
                "tia_data.wt_pct_missing",
                alloy_id,
                format!("weight percent for {element} in {alloy_id} is missing or unreadable"),
            )
        })?;
        moles.push((*element, wt_pct, wt_pct / weight));
    }

    let total: f64 = moles.iter().map(|(_, _, mol)| mol).sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(composition_error(
            "tia_data.zero_moles",
            alloy_id,
            format!("total molar quantity for {alloy_id} is {total}"),
        ));
    }

    let mut composition = Composition::new();
    for (element, wt_pct, mol) in moles {
        let fraction = ElementFraction {
            wt_pct,
            at_pct: 100.0 * mol / total,
        };
        if composition.insert(element.to_string(), fraction).is_some() {
            return Err(composition_error(
                "tia_data.duplicate_element",
                alloy_id,
                format!("element {element} listed more than once for {alloy_id}"),
            ));
        }
    }
    Ok(composition)
}

/// Groups composition rows by alloy and converts each group.
///
/// Every alloy in the table is converted, including alloys that will later
/// be dropped by the join, so an unknown element anywhere is an error.
pub fn compute_compositions(
    records: &[CompositionRecord],
    weights: &AtomicWeights,
) -> Result<BTreeMap<String, Composition>, TiaError> {
    let mut grouped: BTreeMap<&str, Vec<(&str, Option<f64>)>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.alloy_id.as_str())
            .or_default()
            .push((record.element.as_str(), record.wt_pct));
    }
    let mut compositions = BTreeMap::new();
    for (alloy_id, elements) in grouped {
        let composition = atomic_percent(alloy_id, &elements, weights)?;
        debug!(alloy_id, elements = composition.len(), "atomic percent computed");
        compositions.insert(alloy_id.to_string(), composition);
    }
    Ok(compositions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titanium_aluminium_binary() {
        let weights = AtomicWeights::default();
        let comp = atomic_percent("TiAl", &[("Ti", Some(90.0)), ("Al", Some(10.0))], &weights)
            .unwrap();
        let ti_mol = 90.0 / 47.867;
        let al_mol = 10.0 / 26.9815385;
        let expected_ti = 100.0 * ti_mol / (ti_mol + al_mol);
        assert!((comp["Ti"].at_pct - expected_ti).abs() < 1e-12);
        assert!((comp["Ti"].at_pct - 83.534).abs() < 1e-3);
        assert!((comp["Al"].at_pct - 16.466).abs() < 1e-3);
        assert_eq!(comp["Ti"].wt_pct, 90.0);
    }

    #[test]
    fn elements_keep_table_order() {
        let elements = [("V", Some(4.0)), ("Ti", Some(90.0)), ("Al", Some(6.0))];
        let comp = atomic_percent("Ti64", &elements, &AtomicWeights::default()).unwrap();
        let order: Vec<&str> = comp.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["V", "Ti", "Al"]);
    }

    #[test]
    fn single_element_is_pure() {
        let comp =
            atomic_percent("cp", &[("Ti", Some(100.0))], &AtomicWeights::default()).unwrap();
        assert_eq!(comp["Ti"].at_pct, 100.0);
    }

    #[test]
    fn unknown_element_names_the_element() {
        let elements = [("Ti", Some(90.0)), ("Xx", Some(10.0))];
        let err = atomic_percent("X", &elements, &AtomicWeights::default()).unwrap_err();
        assert!(matches!(err, TiaError::Composition(_)));
        assert_eq!(err.info().context["element"], "Xx");
        assert_eq!(err.info().context["alloy_id"], "X");
        assert!(err.info().message.contains("Xx"));
    }

    #[test]
    fn duplicate_and_zero_are_rejected() {
        let weights = AtomicWeights::default();
        let dup = atomic_percent("D", &[("Ti", Some(50.0)), ("Ti", Some(50.0))], &weights)
            .unwrap_err();
        assert_eq!(dup.info().code, "tia_data.duplicate_element");
        let zero = atomic_percent("Z", &[("Ti", Some(0.0))], &weights).unwrap_err();
        assert_eq!(zero.info().code, "tia_data.zero_moles");
        let missing = atomic_percent("M", &[("Ti", None)], &weights).unwrap_err();
        assert_eq!(missing.info().code, "tia_data.wt_pct_missing");
    }
}
