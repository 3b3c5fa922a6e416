use crate::algorithm::ripple::{ArrivalRule, RippleSpreading};
use crate::graph::directed::DirectedGraph;
use crate::graph::MutableGraph;
use ordered_float::OrderedFloat;
use pyo3::prelude::*;

#[pyclass]
pub struct PyGraph {
    graph: DirectedGraph<OrderedFloat<f64>>,
}

#[pymethods]
impl PyGraph {
    #[new]
    fn new() -> Self {
        PyGraph {
            graph: DirectedGraph::new(),
        }
    }

    fn add_vertex(&mut self) -> usize {
        self.graph.add_vertex()
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: f64) -> bool {
        self.graph.add_edge(from, to, OrderedFloat(weight))
    }

    fn add_undirected_edge(&mut self, a: usize, b: usize, weight: f64) -> bool {
        self.graph.add_undirected_edge(a, b, OrderedFloat(weight))
    }
}

#[pyclass]
pub struct PyRippleSpreading {
    inner: RippleSpreading,
}

#[pymethods]
impl PyRippleSpreading {
    #[new]
    #[pyo3(signature = (window = false))]
    fn new(window: bool) -> Self {
        let rule = if window { ArrivalRule::Window } else { ArrivalRule::Cumulative };
        PyRippleSpreading {
            inner: RippleSpreading::new().with_arrival_rule(rule),
        }
    }

    /// Returns `(path, length)`; an unreachable destination gives `([], None)`
    fn find_path(
        &self,
        graph: &PyGraph,
        source: usize,
        destination: usize,
    ) -> PyResult<(Vec<usize>, Option<f64>)> {
        let result = self
            .inner
            .find_path(&graph.graph, source, destination)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
        Ok((result.path, result.length.map(|l| l.into_inner())))
    }
}

#[pymodule]
fn ripple_sssp_py(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyGraph>()?;
    m.add_class::<PyRippleSpreading>()?;
    Ok(())
}
