//! Appending variants to an existing list.

use std::collections::HashMap;

use tracing::debug;

use svl_model::{OptionCatalog, OptionValues, StableId, VariantList, VariantRecord};

use crate::allocate::{StableIdAllocator, next_stable_id};
use crate::error::{Result, ValidationError};

/// Ids handed out by one append, contiguous and ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendedRange {
    /// Id of the first appended row, or the id the next row would have
    /// received when nothing was appended.
    pub first: StableId,
    pub count: usize,
}

impl AppendedRange {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn ids(&self) -> impl Iterator<Item = StableId> {
        let first = self.first.get();
        (0..self.count).filter_map(move |offset| {
            u32::try_from(offset)
                .ok()
                .and_then(|offset| first.checked_add(offset))
                .and_then(|id| StableId::new(id).ok())
        })
    }
}

/// Appends one row per line of a sparse value matrix.
///
/// `headers` names the columns like the first line of a CSV file;
/// `matrix` holds the remaining cells row-major, so row `r` column `c` is
/// `matrix[r * headers.len() + c]`. For example, headers
/// `["o_fog", "o_shadow"]` with matrix `["0", "1", "1", "0"]` appends
/// `{o_fog: 0, o_shadow: 1}` and `{o_fog: 1, o_shadow: 0}`.
///
/// Options are visited in catalog order. An option missing from the header
/// is left out of the new record rather than defaulted, and so is an empty
/// cell; a header naming an option the catalog does not declare is ignored. On any error the list is
/// left untouched.
pub fn append_sparse_variant_set<C, H, V>(
    list: &mut VariantList,
    catalog: &C,
    headers: &[H],
    matrix: &[V],
) -> Result<AppendedRange>
where
    C: OptionCatalog + ?Sized,
    H: AsRef<str>,
    V: AsRef<str>,
{
    let columns = header_columns(headers, matrix.len())?;
    let descriptors = catalog.options()?;
    let width = headers.len();
    let rows = matrix.len() / width;

    let mut ids = StableIdAllocator::after(list)?;
    let first = next_stable_id(list)?;
    let mut appended = Vec::with_capacity(rows);
    for row in 0..rows {
        let mut options = OptionValues::with_capacity(width);
        for descriptor in &descriptors {
            let Some(&column) = columns.get(descriptor.name()) else {
                continue;
            };
            let cell = matrix[row * width + column].as_ref();
            if !cell.is_empty() {
                options.insert(descriptor.name(), cell);
            }
        }
        appended.push(VariantRecord::new(ids.allocate()?, options));
    }

    debug!(rows, columns = width, first_id = %first, "appending sparse variant set");
    list.variants.extend(appended);
    Ok(AppendedRange {
        first,
        count: rows,
    })
}

/// Appends one record that constrains no option and returns its id.
///
/// Like every generation path this needs the shader's option catalog, even
/// though the new record is empty.
pub fn add_variant_row<C>(list: &mut VariantList, catalog: &C) -> Result<StableId>
where
    C: OptionCatalog + ?Sized,
{
    catalog.option_count()?;
    let stable_id = next_stable_id(list)?;
    list.variants
        .push(VariantRecord::new(stable_id, OptionValues::new()));
    Ok(stable_id)
}

fn header_columns<H: AsRef<str>>(
    headers: &[H],
    matrix_len: usize,
) -> std::result::Result<HashMap<&str, usize>, ValidationError> {
    if headers.is_empty() {
        return Err(ValidationError::EmptyHeader);
    }
    if matrix_len % headers.len() != 0 {
        return Err(ValidationError::RaggedMatrix {
            matrix_len,
            header_len: headers.len(),
        });
    }
    let mut columns = HashMap::with_capacity(headers.len());
    for (column, name) in headers.iter().enumerate() {
        if columns.insert(name.as_ref(), column).is_some() {
            return Err(ValidationError::DuplicateHeader {
                name: name.as_ref().to_string(),
            });
        }
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appended_range_lists_ids() {
        let range = AppendedRange {
            first: StableId::new(4).unwrap(),
            count: 3,
        };
        let ids: Vec<u32> = range.ids().map(StableId::get).collect();
        assert_eq!(ids, vec![4, 5, 6]);
    }

    #[test]
    fn header_validation() {
        assert_eq!(
            header_columns::<&str>(&[], 0),
            Err(ValidationError::EmptyHeader)
        );
        assert_eq!(
            header_columns(&["a", "b"], 3),
            Err(ValidationError::RaggedMatrix {
                matrix_len: 3,
                header_len: 2
            })
        );
        assert_eq!(
            header_columns(&["a", "a"], 4),
            Err(ValidationError::DuplicateHeader {
                name: "a".to_string()
            })
        );
        let columns = header_columns(&["a", "b"], 4).unwrap();
        assert_eq!(columns.get("b"), Some(&1));
    }
}
