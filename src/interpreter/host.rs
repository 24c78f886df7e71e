use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::core::Value;

/// The runtime's view of its embedder.
///
/// The core is parameterised by an output sink and a module registry; it
/// never touches stdio on its own. `print` and top-level error reporting go
/// through the sink, and `import` resolves against the registry.
pub struct Host<'a> {
    output:      Box<dyn FnMut(&str, bool) + 'a>,
    /// Module name to module object, consulted by `import`.
    pub modules: HashMap<String, Value>,
}

impl<'a> Host<'a> {
    /// Creates a host around an output callback.
    ///
    /// The callback receives one finished line at a time; the second
    /// argument is `true` for error reporting.
    pub fn new(output: impl FnMut(&str, bool) + 'a) -> Self {
        Self { output:  Box::new(output),
               modules: HashMap::new(), }
    }

    /// A host wired to the process's stdout and stderr.
    #[must_use]
    pub fn stdio() -> Host<'static> {
        Host::new(|text, is_error| {
            if is_error {
                eprintln!("{text}");
            } else {
                println!("{text}");
            }
        })
    }

    /// A host that collects emitted lines into a shared buffer.
    ///
    /// Useful for tests and embedders that want to inspect a script's output
    /// rather than stream it.
    ///
    /// # Example
    /// ```
    /// use squared::interpreter::host::Host;
    ///
    /// let (mut host, lines) = Host::collecting();
    /// host.write_line("hello", false);
    ///
    /// assert_eq!(*lines.borrow(), vec!["hello".to_string()]);
    /// ```
    #[must_use]
    pub fn collecting() -> (Host<'static>, Rc<RefCell<Vec<String>>>) {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&lines);
        let host = Host::new(move |text: &str, _is_error: bool| {
            sink.borrow_mut().push(text.to_string());
        });
        (host, lines)
    }

    /// Registers a module object under a name for `import` to find.
    pub fn register_module(&mut self, name: &str, module: Value) {
        self.modules.insert(name.to_string(), module);
    }

    /// Emits one line through the output callback.
    pub fn write_line(&mut self, text: &str, is_error: bool) {
        (self.output)(text, is_error);
    }
}
