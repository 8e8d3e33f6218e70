mod cells;
mod sheets;
mod styles;
