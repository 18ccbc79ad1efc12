/// Destination for listed rows.
///
/// Listings stream each record out as soon as it is built rather than
/// accumulating internally, so callers choose the buffering policy.
pub trait RowSink<R> {
    fn emit(&mut self, row: R);
}

impl<R> RowSink<R> for Vec<R> {
    fn emit(&mut self, row: R) {
        self.push(row);
    }
}

/// Adapter turning a closure into a [`RowSink`], for callers that
/// stream rows onward instead of collecting them.
pub struct FnSink<F>(pub F);

impl<R, F: FnMut(R)> RowSink<R> for FnSink<F> {
    fn emit(&mut self, row: R) {
        (self.0)(row);
    }
}
