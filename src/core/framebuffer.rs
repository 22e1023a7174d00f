/// Color and depth storage for one software-rendered frame.
///
/// Both buffers are sized once (and again only on [`FrameBuffer::resize`])
/// and reset in place by [`FrameBuffer::clear`] at the start of every frame.
/// Colors are packed `0x00RRGGBB`, which is also the layout the window
/// surface expects, so presenting needs no conversion.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color_buffer: vec![0; size],
            depth_buffer: vec![f32::INFINITY; size],
        }
    }

    /// Reallocates both buffers for new dimensions. Contents are reset.
    pub fn resize(&mut self, width: usize, height: usize) {
        let size = width * height;
        self.width = width;
        self.height = height;
        self.color_buffer = vec![0; size];
        self.depth_buffer = vec![f32::INFINITY; size];
    }

    /// Resets every pixel to `clear_color` and every depth to +infinity.
    pub fn clear(&mut self, clear_color: u32) {
        self.color_buffer.fill(clear_color);
        self.depth_buffer.fill(f32::INFINITY);
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Depth test and update.
    ///
    /// Only a strictly closer value passes: if the stored depth is less than
    /// or equal to `new_depth` the fragment is rejected and the buffer is
    /// left untouched, so exact ties keep the earlier fragment.
    #[inline]
    pub fn depth_test_and_update(&mut self, x: usize, y: usize, new_depth: f32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        if self.depth_buffer[idx] <= new_depth {
            return false;
        }
        self.depth_buffer[idx] = new_depth;
        true
    }

    /// Writes a packed color. Should only follow a passing depth test.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.color_buffer[idx] = color;
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.color_buffer[self.index(x, y)])
    }

    pub fn get_depth(&self, x: usize, y: usize) -> Option<f32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.depth_buffer[self.index(x, y)])
    }

    /// Row-major packed pixels, ready to blit.
    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }
}
