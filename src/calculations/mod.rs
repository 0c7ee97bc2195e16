pub(crate) mod calendar_sweep;
pub(crate) mod classification;
pub(crate) mod event_ranges;
pub(crate) mod tick_aggregation;
