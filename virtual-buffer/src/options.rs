/// Configuration for [`crate::ScrollBuffer`].
///
/// All fields are plain data, so options are cheap to copy and can be serialized alongside host
/// state (with `feature = "serde"`).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferOptions {
    /// Height of every row. Padding arithmetic assumes it is uniform.
    pub item_height: u32,
    pub viewport_height: u32,
    /// Rows requested per fetch.
    pub buffer_size: usize,
    /// Look-ahead margin as a multiple of the viewport height.
    ///
    /// The buffer grows at an edge while the rendered rows end closer than this to the
    /// visible area.
    pub padding: f32,
    /// Retention margin as a multiple of the viewport height.
    ///
    /// Rows further than this from the visible area are evicted into padding. Values below
    /// `padding` are raised to `padding`.
    pub retention: f32,
    /// Index of the first row requested when the buffer is empty.
    pub start_index: i64,
    /// Known lowest index, if the data source reports one up front.
    pub min_index: Option<i64>,
    /// Known highest index, if the data source reports one up front.
    pub max_index: Option<i64>,
}

impl BufferOptions {
    /// Creates options for rows of `item_height`.
    pub fn new(item_height: u32) -> Self {
        Self {
            item_height,
            viewport_height: 0,
            buffer_size: 10,
            padding: 0.5,
            retention: 1.0,
            start_index: 1,
            min_index: None,
            max_index: None,
        }
    }

    pub fn with_viewport_height(mut self, viewport_height: u32) -> Self {
        self.viewport_height = viewport_height;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_retention(mut self, retention: f32) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_start_index(mut self, start_index: i64) -> Self {
        self.start_index = start_index;
        self
    }

    pub fn with_min_index(mut self, min_index: Option<i64>) -> Self {
        self.min_index = min_index;
        self
    }

    pub fn with_max_index(mut self, max_index: Option<i64>) -> Self {
        self.max_index = max_index;
        self
    }

    pub(crate) fn item_height_u64(&self) -> u64 {
        self.item_height as u64
    }

    pub(crate) fn effective_buffer_size(&self) -> usize {
        self.buffer_size.max(1)
    }

    /// Look-ahead margin in pixels.
    pub fn look_ahead(&self) -> u64 {
        scale(self.viewport_height, self.padding)
    }

    /// Retention margin in pixels.
    pub fn retention_margin(&self) -> u64 {
        scale(self.viewport_height, self.retention).max(self.look_ahead())
    }
}

fn scale(viewport_height: u32, factor: f32) -> u64 {
    if factor.is_nan() || factor <= 0.0 {
        return 0;
    }
    (viewport_height as f32 * factor) as u64
}
