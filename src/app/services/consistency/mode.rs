//! Mode and submode pairing

use super::ConsistencyValidator;
use crate::app::models::{Diagnostic, Record};
use crate::constants::fields;

impl ConsistencyValidator<'_> {
    /// A record needs a mode; a submode must belong to it
    ///
    /// An unknown mode was already reported by the compliance check on its
    /// enumeration, so only its effect on the submode is reported here.
    pub(super) fn check_mode(&self, record: &Record, diagnostics: &mut Vec<Diagnostic>) {
        let mode = record.lookup(fields::MODE);
        if mode.is_none() {
            diagnostics.push(Diagnostic::consistency(
                "QSO does not have a valid mode",
                record.end_line(),
            ));
        }

        let Some(submode) = record.lookup(fields::SUBMODE) else {
            return;
        };
        let known = mode.and_then(|mode| {
            self.reference
                .submodes_of(&mode.value)
                .map(|submodes| (mode.value, submodes))
        });

        match known {
            None => diagnostics.push(Diagnostic::consistency(
                format!("SUBMODE '{}' without a valid MODE", submode.value),
                submode.line,
            )),
            Some((mode, submodes)) if !submodes.contains(&submode.value) => {
                diagnostics.push(Diagnostic::consistency(
                    format!(
                        "'{}' is not a valid SUBMODE for MODE '{}'",
                        submode.value, mode
                    ),
                    submode.line,
                ))
            }
            Some(_) => {}
        }
    }
}
