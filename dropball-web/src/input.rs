/// Browser pointer and wheel state, fed by the page's event listeners.
#[derive(Debug, Default)]
pub struct InputState {
    pub pointer_down: bool,
    pub pointer_x: f64,
    pub pointer_y: f64,
    pub pointer_dx: f64,
    pub pointer_dy: f64,
    pub wheel_delta: f64,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, x: f64, y: f64) {
        self.pointer_down = true;
        self.pointer_x = x;
        self.pointer_y = y;
    }

    /// Track the pointer; drag deltas only accumulate while pressed.
    pub fn move_to(&mut self, x: f64, y: f64) {
        if self.pointer_down {
            self.pointer_dx += x - self.pointer_x;
            self.pointer_dy += y - self.pointer_y;
        }
        self.pointer_x = x;
        self.pointer_y = y;
    }

    pub fn release(&mut self) {
        self.pointer_down = false;
    }

    pub fn scroll(&mut self, delta_y: f64) {
        self.wheel_delta += delta_y;
    }

    /// Reset per-frame deltas.
    pub fn update(&mut self) {
        self.pointer_dx = 0.0;
        self.pointer_dy = 0.0;
        self.wheel_delta = 0.0;
    }
}
