//! The host-runtime global member list.
//!
//! The renderer resolves any free identifier that is neither a local nor a
//! class member against this set; a hit rewrites the identifier to a `$p.`
//! member access. The set therefore has to match the host runtime's surface
//! exactly — a missing name leaves a sketch variable dangling, an extra name
//! captures a user variable.
//!
//! The list covers the Processing API (color, shape, transform, math, image,
//! text, and input built-ins), the sketch lifecycle hooks, and the `__*`
//! helper functions that the expression rewrites introduce. Hosts extend it
//! per invocation through `TranslateOptions` (custom functions and library
//! exports); nothing is ever added globally.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// Names the host runtime publishes on `$p`.
pub static GLOBAL_MEMBERS: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| MEMBER_NAMES.iter().copied().collect());

/// `true` when `name` is a host-runtime member.
pub fn is_global_member(name: &str) -> bool {
    GLOBAL_MEMBERS.contains(name)
}

#[rustfmt::skip]
static MEMBER_NAMES: &[&str] = &[
    "abs", "acos", "alpha", "ambient", "ambientLight", "append", "applyMatrix",
    "arc", "arrayCopy", "asin", "atan", "atan2", "background", "beginCamera",
    "beginDraw", "beginShape", "bezier", "bezierDetail", "bezierPoint",
    "bezierTangent", "bezierVertex", "binary", "blend", "blendColor",
    "blit_resize", "blue", "box", "breakShape", "brightness", "camera",
    "ceil", "Character", "color", "colorMode", "concat", "constrain", "copy",
    "cos", "createFont", "createGraphics", "createImage", "createInput",
    "createOutput", "createReader", "createWriter", "cursor", "curve",
    "curveDetail", "curvePoint", "curveTangent", "curveTightness",
    "curveVertex", "day", "degrees", "directionalLight", "disableContextMenu",
    "dist", "draw", "ellipse", "ellipseMode", "emissive", "enableContextMenu",
    "endCamera", "endDraw", "endShape", "exit", "exp", "expand", "externals",
    "fill", "filter", "floor", "focused", "frameCount", "frameRate",
    "frustum", "get", "glyphLook", "glyphTable", "green", "height", "hex",
    "hint", "hour", "hue", "image", "imageMode", "join", "key", "keyCode",
    "keyPressed", "keyReleased", "keyTyped", "lerp", "lerpColor",
    "lightFalloff", "lights", "lightSpecular", "line", "link", "loadBytes",
    "loadFont", "loadGlyphs", "loadImage", "loadPixels", "loadShape",
    "loadStrings", "loadXML", "log", "loop", "mag", "map", "match",
    "matchAll", "max", "millis", "min", "minute", "mix", "modelX", "modelY",
    "modelZ", "modes", "month", "mouseButton", "mouseClicked", "mouseDragged",
    "mouseMoved", "mouseOut", "mouseOver", "mousePressed", "mouseReleased",
    "mouseScroll", "mouseScrolled", "mouseX", "mouseY", "nf", "nfc", "nfp",
    "nfs", "noCursor", "noFill", "noise", "noiseDetail", "noiseSeed",
    "noLoop", "norm", "normal", "noSmooth", "noStroke", "noTint", "ortho",
    "param", "parseBoolean", "parseByte", "parseChar", "parseFloat",
    "parseInt", "peg", "perspective", "PFont", "PImage", "PMatrix2D",
    "PMatrix3D", "PMatrixStack", "point", "pointLight", "popMatrix",
    "popStyle", "pow", "print", "printCamera", "println", "printMatrix",
    "printProjection", "PShape", "PShapeSVG", "pushMatrix", "pushStyle",
    "PVector", "quad", "radians", "random", "randomGaussian", "randomSeed",
    "rect", "rectMode", "red", "redraw", "requestImage", "resetMatrix",
    "reverse", "rotate", "rotateX", "rotateY", "rotateZ", "round",
    "saturation", "save", "saveBytes", "saveFrame", "saveStrings", "scale",
    "screenX", "screenY", "screenZ", "second", "set", "setup", "shape",
    "shapeMode", "shared", "shearX", "shearY", "shininess", "shorten", "sin",
    "size", "smooth", "sort", "specular", "sphere", "sphereDetail", "splice",
    "split", "splitTokens", "spotLight", "sq", "sqrt", "status", "str",
    "stroke", "strokeCap", "strokeJoin", "strokeWeight", "subset", "tan",
    "text", "textAlign", "textAscent", "textDescent", "textFont",
    "textLeading", "textMode", "textSize", "texture", "textureMode",
    "textWidth", "tint", "toImageData", "touchCancel", "touchEnd",
    "touchMove", "touchStart", "translate", "triangle", "trim", "unbinary",
    "unhex", "updatePixels", "use3DContext", "vertex", "width", "XML",
    "XMLElement", "year",
    // Helpers introduced by the expression rewrites; the host defines them
    // alongside the regular API.
    "__contains", "__codePointAt", "__endsWith", "__equals",
    "__equalsIgnoreCase", "__frameRate", "__hashCode", "__instanceof",
    "__int_cast", "__keyPressed", "__matches", "__mousePressed",
    "__printStackTrace", "__replace", "__replaceAll", "__replaceFirst",
    "__split", "__startsWith", "__toCharArray",
];
