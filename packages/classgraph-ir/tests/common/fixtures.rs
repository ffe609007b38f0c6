//! Test fixtures
//!
//! Small class sets shaped like real javac output: every nested class lists
//! itself in its own InnerClasses attribute, and the outer class lists all
//! of its direct nested classes.

use classgraph_ir::{AccessFlags, ClassContext, LoadedClass};

/// `app/Outer` with a member, an anonymous `Runnable`, a local class, and a
/// member nested two levels deep
pub fn outer_with_nested() -> ClassContext {
    ClassContext::from_classes(vec![
        LoadedClass::builder("app/Outer")
            .inner_class("app/Outer$Inner", Some("app/Outer"), Some("Inner"), AccessFlags::PUBLIC)
            .inner_class("app/Outer$1", None, None, AccessFlags::STATIC)
            .inner_class("app/Outer$1Helper", None, Some("Helper"), AccessFlags::PRIVATE | AccessFlags::FINAL)
            .method("run", "()V", |m| m)
            .build(),
        LoadedClass::builder("app/Outer$Inner")
            .inner_class("app/Outer$Inner", Some("app/Outer"), Some("Inner"), AccessFlags::PUBLIC)
            .inner_class(
                "app/Outer$Inner$Deep",
                Some("app/Outer$Inner"),
                Some("Deep"),
                AccessFlags::PROTECTED | AccessFlags::STATIC,
            )
            .build(),
        LoadedClass::builder("app/Outer$Inner$Deep")
            .inner_class("app/Outer$Inner", Some("app/Outer"), Some("Inner"), AccessFlags::PUBLIC)
            .inner_class(
                "app/Outer$Inner$Deep",
                Some("app/Outer$Inner"),
                Some("Deep"),
                AccessFlags::PROTECTED | AccessFlags::STATIC,
            )
            .build(),
        LoadedClass::builder("app/Outer$1")
            .interface("java/lang/Runnable")
            .inner_class("app/Outer$1", None, None, AccessFlags::STATIC)
            .enclosing_method("app/Outer", Some(("run", "()V")))
            .build(),
        LoadedClass::builder("app/Outer$1Helper")
            .inner_class("app/Outer$1Helper", None, Some("Helper"), AccessFlags::PRIVATE | AccessFlags::FINAL)
            .enclosing_method("app/Outer", Some(("run", "()V")))
            .build(),
        LoadedClass::builder("app/Other").build(),
    ])
}

/// Exception hierarchy as library (non-own) classes
pub fn exception_hierarchy() -> Vec<LoadedClass> {
    vec![
        LoadedClass::builder("java/lang/Throwable").own(false).build(),
        LoadedClass::builder("java/lang/Exception")
            .own(false)
            .super_class(Some("java/lang/Throwable"))
            .build(),
        LoadedClass::builder("java/io/IOException")
            .own(false)
            .super_class(Some("java/lang/Exception"))
            .build(),
        LoadedClass::builder("java/io/FileNotFoundException")
            .own(false)
            .super_class(Some("java/io/IOException"))
            .build(),
    ]
}
