use alloc::vec::Vec;

use listwindow::{Error, Geometry, ListWindow, Metrics, RenderWindow, Timer};

/// Produces a host node for a realized index.
pub trait Realize {
    type Node;

    fn realize(&mut self, index: usize, geometry: Geometry, is_scrolling: bool) -> Self::Node;
}

impl<N, F> Realize for F
where
    F: FnMut(usize, Geometry, bool) -> N,
{
    type Node = N;

    fn realize(&mut self, index: usize, geometry: Geometry, is_scrolling: bool) -> N {
        self(index, geometry, is_scrolling)
    }
}

/// Outcome of one [`Renderer::render`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderPass {
    pub window: RenderWindow,
    /// Nodes realized by this call; `0` when the previous nodes were reused.
    pub realized: usize,
}

impl RenderPass {
    pub fn reused(&self) -> bool {
        self.realized == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RenderKey {
    window: RenderWindow,
    item_count: usize,
    is_scrolling: bool,
    generation: u64,
}

/// Keeps the nodes of the last realized window.
///
/// Every index in the overscan range is realized again only when the window, the in-motion flag
/// handed to items, or the engine's geometry generation changed since the previous pass.
#[derive(Debug)]
pub struct Renderer<R: Realize> {
    realize: R,
    nodes: Vec<(usize, R::Node)>,
    last: Option<RenderKey>,
}

impl<R: Realize> Renderer<R> {
    pub fn new(realize: R) -> Self {
        Self {
            realize,
            nodes: Vec::new(),
            last: None,
        }
    }

    pub fn realize(&self) -> &R {
        &self.realize
    }

    pub fn realize_mut(&mut self) -> &mut R {
        &mut self.realize
    }

    /// Realized nodes in ascending index order.
    pub fn nodes(&self) -> &[(usize, R::Node)] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&R::Node> {
        let first = self.nodes.first()?.0;
        let (i, node) = self.nodes.get(index.checked_sub(first)?)?;
        (*i == index).then_some(node)
    }

    /// The window the current nodes were realized for.
    pub fn realized_window(&self) -> Option<RenderWindow> {
        self.last.map(|k| k.window)
    }

    /// Forces the next `render` to realize every node again.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn render<M: Metrics, T: Timer>(
        &mut self,
        list: &mut ListWindow<M, T>,
    ) -> Result<RenderPass, Error> {
        let window = list.render_window()?;
        let key = RenderKey {
            window,
            item_count: list.item_count(),
            is_scrolling: list.config().use_is_scrolling && list.is_scrolling(),
            generation: list.geometry_generation(),
        };
        if self.last == Some(key) {
            return Ok(RenderPass {
                window,
                realized: 0,
            });
        }

        self.last = None;
        self.nodes.clear();
        let realize = &mut self.realize;
        let nodes = &mut self.nodes;
        list.for_each_item(|item| {
            let node = realize.realize(item.index, item.geometry, item.is_scrolling);
            nodes.push((item.index, node));
        })?;
        self.last = Some(key);

        vtrace!(
            start = window.overscan_start,
            stop = window.overscan_stop,
            realized = self.nodes.len(),
            "render"
        );
        Ok(RenderPass {
            window,
            realized: self.nodes.len(),
        })
    }
}
