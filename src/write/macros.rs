macro_rules! adaptor {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug)]
        pub struct $name<W> {
            inner: crate::write::Writer<W>,
        }

        impl<W: std::io::Write> $name<W> {
            /// Finishes the stream, writing any trailer, and returns the underlying writer.
            pub fn finish(self) -> std::io::Result<W> {
                self.inner.finish()
            }
        }

        impl<W> $name<W> {
            /// Acquires a reference to the underlying writer.
            pub fn get_ref(&self) -> &W {
                self.inner.get_ref()
            }

            /// Acquires a mutable reference to the underlying writer.
            ///
            /// Note that care must be taken to avoid tampering with the state of the writer
            /// which may otherwise confuse the output stream.
            pub fn get_mut(&mut self) -> &mut W {
                self.inner.get_mut()
            }

            /// Bytes written into this adaptor so far.
            pub fn total_in(&self) -> u64 {
                self.inner.session().total_in()
            }

            /// Bytes passed on to the underlying writer so far.
            pub fn total_out(&self) -> u64 {
                self.inner.session().total_out()
            }
        }

        impl<W: std::io::Write> std::io::Write for $name<W> {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                std::io::Write::write(&mut self.inner, buf)
            }

            fn flush(&mut self) -> std::io::Result<()> {
                std::io::Write::flush(&mut self.inner)
            }
        }

        const _: () = {
            fn _assert() {
                fn _assert_send<T: Send>() {}
                _assert_send::<$name<Vec<u8>>>();
            }
        };
    };
}
