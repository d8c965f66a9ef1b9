//! Canonicalize command implementation.

use crate::cli::CanonicalizeArgs;
use crate::error::Result;
use crate::output::{Formatter, NameForms};
use chainscope_resolver::canonical::{canonicalize, normalize};

/// Execute the canonicalize command.
pub fn execute_canonicalize(args: CanonicalizeArgs, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_names(&name_forms(&args.names))?);
    Ok(())
}

fn name_forms(names: &[String]) -> Vec<NameForms> {
    names
        .iter()
        .map(|name| NameForms {
            original: name.clone(),
            normalized: normalize(name),
            canonical: canonicalize(name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_forms() {
        let forms = name_forms(&["Subway #4521".to_string()]);
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].original, "Subway #4521");
        assert_eq!(forms[0].canonical, "subway");
    }
}
