use std::path::PathBuf;

use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::ap::{FrequentLevel, TransactionDb};
use crate::config::Variant;
use crate::error::Error;

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        match err {
            Error::Io { .. } => PyIOError::new_err(err.to_string()),
            Error::Consistency { .. } => PyRuntimeError::new_err(err.to_string()),
            Error::Format { .. } | Error::Validation { .. } => PyValueError::new_err(err.to_string()),
        }
    }
}

type LevelArrays<'py> = (Bound<'py, PyArray2<i64>>, Bound<'py, PyArray1<u64>>);

fn level_to_arrays<'py>(py: Python<'py>, level: &FrequentLevel) -> PyResult<LevelArrays<'py>> {
    let itemset_size = level.itemset_size;
    let num_itemsets = level.len();
    let mut data = vec![0i64; num_itemsets * itemset_size];
    let mut supports = Vec::with_capacity(num_itemsets);

    for (i, (pattern, support)) in level.iter().enumerate() {
        for (j, &item) in pattern.items().iter().enumerate() {
            data[i * itemset_size + j] = item;
        }
        supports.push(support);
    }

    let array = Array2::from_shape_vec((num_itemsets, itemset_size), data)
        .map_err(|_| PyValueError::new_err("Failed to create array"))?;

    Ok((array.into_pyarray(py), supports.into_pyarray(py)))
}

/// One `(itemsets, supports)` pair per non-empty level, ascending size.
#[pyfunction]
#[pyo3(name = "mine", signature = (path, min_support, prune = false))]
fn mine_py(
    py: Python<'_>,
    path: PathBuf,
    min_support: f64,
    prune: bool,
) -> PyResult<Vec<LevelArrays<'_>>> {
    let variant = if prune { Variant::Rmtid } else { Variant::Classic };
    let patterns =
        py.allow_threads(|| crate::ap::mine(TransactionDb::from_path(path), min_support, variant))?;

    patterns
        .levels()
        .iter()
        .filter(|level| !level.is_empty())
        .map(|level| level_to_arrays(py, level))
        .collect()
}

#[pyfunction]
#[pyo3(name = "transaction_count")]
fn transaction_count_py(path: PathBuf) -> PyResult<u64> {
    Ok(TransactionDb::from_path(path).transaction_count()?)
}

#[pymodule]
fn apriori(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(mine_py, m)?)?;
    m.add_function(wrap_pyfunction!(transaction_count_py, m)?)?;
    Ok(())
}
