use crate::{
    BoundsNormalizer, FlowData, FlowLayoutError, GraphModel, LayoutConfig, LayoutContext,
    LayoutMode, LayoutStrategy, NodeId, NodeKey, OverlapResolver,
};
use serde_json::Value;
use tracing::debug;

/// Position every node of `data` with the default configuration
pub fn layout_flow<N: NodeKey>(data: &mut FlowData<N>, mode: LayoutMode) {
    layout_flow_with(data, mode, &LayoutConfig::default());
}

/// Position every node of `data`
///
/// Runs the selected strategy, then overlap resolution and bounds
/// normalization, and writes `left`/`top` pixel offsets onto every node.
/// An empty node list is left as is.
pub fn layout_flow_with<N: NodeKey>(data: &mut FlowData<N>, mode: LayoutMode, config: &LayoutConfig) {
    if data.node_list.is_empty() {
        debug!("Nothing to lay out");
        return;
    }
    debug!(
        "Laying out {} nodes and {} lines with {mode}",
        data.node_list.len(),
        data.line_list.len()
    );

    let model = GraphModel::from_flow(&data.node_list, &data.line_list);
    let mut ctx = LayoutContext::new(model);
    mode.place(&mut ctx, config);
    OverlapResolver::new(config).resolve(&mut ctx.positions);
    BoundsNormalizer::new(config).normalize(&mut ctx.positions);
    ctx.finish(&mut data.node_list);

    debug!("Layout {mode} done");
}

/// Lay out an editor JSON document
///
/// `input` must be an object with `nodeList` and `lineList` arrays. Unknown
/// modes select force layout.
pub fn layout_json(
    input: Value,
    mode: &str,
    config: &LayoutConfig,
) -> Result<Value, FlowLayoutError> {
    let object = input
        .as_object()
        .ok_or(FlowLayoutError::MissingField("nodeList"))?;
    for field in ["nodeList", "lineList"] {
        if !object.contains_key(field) {
            return Err(FlowLayoutError::MissingField(field));
        }
    }

    let mut data: FlowData<NodeId> = serde_json::from_value(input)?;
    layout_flow_with(&mut data, LayoutMode::from(mode), config);
    Ok(serde_json::to_value(data)?)
}
