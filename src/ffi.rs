use crate::algorithm::ripple::RippleSpreading;
use crate::graph::directed::DirectedGraph;
use crate::graph::MutableGraph;
use ordered_float::OrderedFloat;

pub struct FfiGraph {
    graph: DirectedGraph<OrderedFloat<f64>>,
}

#[no_mangle]
pub extern "C" fn rsa_graph_new() -> *mut FfiGraph {
    Box::into_raw(Box::new(FfiGraph {
        graph: DirectedGraph::new(),
    }))
}

/// # Safety
///
/// `g` must come from `rsa_graph_new` and not have been freed.
#[no_mangle]
pub unsafe extern "C" fn rsa_graph_add_vertex(g: *mut FfiGraph) -> usize {
    (*g).graph.add_vertex()
}

/// # Safety
///
/// `g` must come from `rsa_graph_new` and not have been freed.
#[no_mangle]
pub unsafe extern "C" fn rsa_graph_add_edge(
    g: *mut FfiGraph,
    from: usize,
    to: usize,
    weight: f64,
) -> bool {
    (*g).graph.add_edge(from, to, OrderedFloat(weight))
}

/// # Safety
///
/// `g` must come from `rsa_graph_new`; it is invalid after this call.
#[no_mangle]
pub unsafe extern "C" fn rsa_graph_free(g: *mut FfiGraph) {
    if !g.is_null() {
        drop(Box::from_raw(g));
    }
}

#[repr(C)]
pub struct FfiPath {
    nodes: *mut usize,
    len: libc::size_t,
    length: f64,
}

/// Runs ripple spreading from `source` to `destination`.
///
/// Returns null on invalid input. An unreachable destination yields a path
/// with `len == 0` and `length == INFINITY`.
///
/// # Safety
///
/// `g` must come from `rsa_graph_new` and not have been freed.
#[no_mangle]
pub unsafe extern "C" fn rsa_find_path(
    g: *const FfiGraph,
    source: usize,
    destination: usize,
) -> *mut FfiPath {
    if g.is_null() {
        return std::ptr::null_mut();
    }
    let graph = &(*g).graph;

    match RippleSpreading::new().find_path(graph, source, destination) {
        Ok(result) => {
            let length = result.length.map(|l| l.into_inner()).unwrap_or(f64::INFINITY);
            let nodes = result.path.into_boxed_slice();
            let len = nodes.len();
            Box::into_raw(Box::new(FfiPath {
                nodes: Box::into_raw(nodes) as *mut usize,
                len,
                length,
            }))
        }
        Err(err) => {
            log::debug!("rsa_find_path failed: {}", err);
            std::ptr::null_mut()
        }
    }
}

/// # Safety
///
/// `path` must come from `rsa_find_path`; it is invalid after this call.
#[no_mangle]
pub unsafe extern "C" fn rsa_path_free(path: *mut FfiPath) {
    if path.is_null() {
        return;
    }
    let path = Box::from_raw(path);
    if !path.nodes.is_null() {
        drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(path.nodes, path.len)));
    }
}
