// Native build dependencies per platform

/// Toolchain provided inside `nix-shell`
pub const NIX: &[&str] = &[
    "autoconf",
    "automake",
    "gnumake",
    "gcc",
    "pkg-config",
    "libpng",
    "poppler",
    "zlib",
];

pub const MACOS: &[&str] = &["autoconf", "automake", "pkg-config", "libpng", "poppler", "zlib"];

pub const FREEBSD: &[&str] = &["autotools", "gmake", "pkgconf", "png", "poppler-glib"];

pub const ARCH: &[&str] = &["base-devel", "libpng", "poppler", "poppler-glib"];

pub const CENTOS: &[&str] = &[
    "autoconf",
    "automake",
    "gcc",
    "gcc-c++",
    "libpng-devel",
    "make",
    "pkgconfig",
    "poppler-devel",
    "poppler-glib-devel",
    "zlib-devel",
];

pub const FEDORA: &[&str] = &[
    "autoconf",
    "automake",
    "gcc",
    "gcc-c++",
    "libpng-devel",
    "make",
    "poppler-devel",
    "poppler-glib-devel",
    "zlib-devel",
];

/// Fedora renamed its pkg-config provider in this release
pub const FEDORA_PKGCONF_SINCE: u32 = 26;

pub const DEBIAN: &[&str] = &[
    "autoconf",
    "automake",
    "g++",
    "gcc",
    "libpng-dev",
    "libpoppler-glib-dev",
    "libpoppler-private-dev",
    "make",
    "pkg-config",
    "zlib1g-dev",
];

/// Msys2 packages without the `mingw-w64-<arch>-` prefix
pub const MSYS2: &[&str] = &[
    "toolchain",
    "libpng",
    "openssl",
    "poppler",
    "zlib",
];
