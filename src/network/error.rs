use crate::network::graph::EdgeId;

#[derive(Debug)]
pub enum NetworkError {
    EmptyNetwork,
    UnknownEdge(EdgeId),
}
