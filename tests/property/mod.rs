mod determinism;
mod reply_bounds;
