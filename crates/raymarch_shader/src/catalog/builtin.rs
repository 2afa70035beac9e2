//! Built-in procedural texture types.
//!
//! Entry functions take `( vec3 pos, vec3 normal, ... )` for the solid variant and
//! `( vec2 uv, vec3 normal, ... )` for the planar variant, followed by the schema
//! parameters in order. Shared helpers (simplex and Worley noise, hashes) are kept apart
//! from the entries so a shader that uses several variants defines them once.
use crate::catalog::{TextureSource, TextureType};
use crate::uniform::SemanticType::{Float, Vec3};

/// Ashima Arts 3D simplex noise (MIT), prefixed to stay clear of caller helpers.
pub const SIMPLEX_NOISE_3D: &str = r#"
vec3 snoise_mod289( vec3 x ) { return x - floor( x * ( 1.0 / 289.0 ) ) * 289.0; }
vec4 snoise_mod289( vec4 x ) { return x - floor( x * ( 1.0 / 289.0 ) ) * 289.0; }
vec4 snoise_permute( vec4 x ) { return snoise_mod289( ( ( x * 34.0 ) + 1.0 ) * x ); }
vec4 snoise_taylorInvSqrt( vec4 r ) { return 1.79284291400159 - 0.85373472095314 * r; }

float snoise( vec3 v ) {
  const vec2 C = vec2( 1.0 / 6.0, 1.0 / 3.0 );
  const vec4 D = vec4( 0.0, 0.5, 1.0, 2.0 );

  vec3 i  = floor( v + dot( v, C.yyy ) );
  vec3 x0 = v - i + dot( i, C.xxx );

  vec3 g  = step( x0.yzx, x0.xyz );
  vec3 l  = 1.0 - g;
  vec3 i1 = min( g.xyz, l.zxy );
  vec3 i2 = max( g.xyz, l.zxy );

  vec3 x1 = x0 - i1 + C.xxx;
  vec3 x2 = x0 - i2 + C.yyy;
  vec3 x3 = x0 - D.yyy;

  i = snoise_mod289( i );
  vec4 p = snoise_permute( snoise_permute( snoise_permute(
             i.z + vec4( 0.0, i1.z, i2.z, 1.0 ) )
           + i.y + vec4( 0.0, i1.y, i2.y, 1.0 ) )
           + i.x + vec4( 0.0, i1.x, i2.x, 1.0 ) );

  float n_ = 0.142857142857;
  vec3  ns = n_ * D.wyz - D.xzx;

  vec4 j = p - 49.0 * floor( p * ns.z * ns.z );

  vec4 x_ = floor( j * ns.z );
  vec4 y_ = floor( j - 7.0 * x_ );

  vec4 x = x_ * ns.x + ns.yyyy;
  vec4 y = y_ * ns.x + ns.yyyy;
  vec4 h = 1.0 - abs( x ) - abs( y );

  vec4 b0 = vec4( x.xy, y.xy );
  vec4 b1 = vec4( x.zw, y.zw );

  vec4 s0 = floor( b0 ) * 2.0 + 1.0;
  vec4 s1 = floor( b1 ) * 2.0 + 1.0;
  vec4 sh = -step( h, vec4( 0.0 ) );

  vec4 a0 = b0.xzyw + s0.xzyw * sh.xxyy;
  vec4 a1 = b1.xzyw + s1.xzyw * sh.zzww;

  vec3 p0 = vec3( a0.xy, h.x );
  vec3 p1 = vec3( a0.zw, h.y );
  vec3 p2 = vec3( a1.xy, h.z );
  vec3 p3 = vec3( a1.zw, h.w );

  vec4 norm = snoise_taylorInvSqrt( vec4( dot( p0, p0 ), dot( p1, p1 ), dot( p2, p2 ), dot( p3, p3 ) ) );
  p0 *= norm.x;
  p1 *= norm.y;
  p2 *= norm.z;
  p3 *= norm.w;

  vec4 m = max( 0.6 - vec4( dot( x0, x0 ), dot( x1, x1 ), dot( x2, x2 ), dot( x3, x3 ) ), 0.0 );
  m = m * m;
  return 42.0 * dot( m * m, vec4( dot( p0, x0 ), dot( p1, x1 ), dot( p2, x2 ), dot( p3, x3 ) ) );
}
"#;

/// Cellular (Worley) noise returning the two nearest feature distances.
pub const WORLEY_NOISE_3D: &str = r#"
vec3 worley_hash( vec3 p ) {
  p = vec3( dot( p, vec3( 127.1, 311.7, 74.7 ) ),
            dot( p, vec3( 269.5, 183.3, 246.1 ) ),
            dot( p, vec3( 113.5, 271.9, 124.6 ) ) );
  return fract( sin( p ) * 43758.5453123 );
}

vec2 worley3D( vec3 p, float jitter, bool manhattanDistance ) {
  vec3 cell = floor( p );
  vec3 f = fract( p );
  float f1 = 8.0;
  float f2 = 8.0;
  for( int k = -1; k <= 1; k++ ) {
    for( int j = -1; j <= 1; j++ ) {
      for( int i = -1; i <= 1; i++ ) {
        vec3 b = vec3( float( i ), float( j ), float( k ) );
        vec3 r = b - f + jitter * worley_hash( cell + b );
        float d = manhattanDistance ? abs( r.x ) + abs( r.y ) + abs( r.z ) : dot( r, r );
        if( d < f1 ) {
          f2 = f1;
          f1 = d;
        } else if( d < f2 ) {
          f2 = d;
        }
      }
    }
  }
  return manhattanDistance ? vec2( f1, f2 ) : sqrt( vec2( f1, f2 ) );
}
"#;

const VORONOI_3D: &str = r#"
vec3 voronoi_hash( vec3 p ) {
  return fract(
    sin( vec3( dot( p, vec3( 1.0, 57.0, 113.0 ) ),
               dot( p, vec3( 57.0, 113.0, 1.0 ) ),
               dot( p, vec3( 113.0, 1.0, 57.0 ) ) ) ) * 43758.5453 );
}

vec3 voronoi_3d( const in vec3 x, float _res ) {
  vec3 p = floor( x );
  vec3 f = fract( x );

  float id = 0.0;
  vec2 res = vec2( _res );
  for( int k = -1; k <= 1; k++ ) {
    for( int j = -1; j <= 1; j++ ) {
      for( int i = -1; i <= 1; i++ ) {
        vec3 b = vec3( float( i ), float( j ), float( k ) );
        vec3 r = vec3( b ) - f + voronoi_hash( p + b );
        float d = dot( r, r );

        float cond = max( sign( res.x - d ), 0.0 );
        float nCond = 1.0 - cond;

        float cond2 = nCond * max( sign( res.y - d ), 0.0 );
        float nCond2 = 1.0 - cond2;

        id = ( dot( p + b, vec3( 1.0, 57.0, 113.0 ) ) * cond ) + ( id * nCond );
        res = vec2( d, res.x ) * cond + res * nCond;

        res.y = cond2 * d + nCond2 * res.y;
      }
    }
  }

  return vec3( sqrt( res ), abs( id ) );
}

vec3 voronoi_select( vec3 v, float mode ) {
  if( mode == 0. ) return vec3( v.x );
  if( mode == 1. ) return vec3( v.y );
  return vec3( v.y - v.x );
}
"#;

const TRUCHET_HELPERS: &str = r#"
float random_truchet( in vec2 _st ) {
  return fract( sin( dot( _st.xy, vec2( 12.9898, 78.233 ) ) ) * 43758.5453123 );
}

vec2 truchetPattern( in vec2 _st, in float _index ) {
  _index = fract( ( ( _index - 0.5 ) * 2.0 ) );
  if( _index > 0.75 ) {
    _st = vec2( 1.0 ) - _st;
  } else if( _index > 0.5 ) {
    _st = vec2( 1.0 - _st.x, _st.y );
  } else if( _index > 0.25 ) {
    _st = 1.0 - vec2( 1.0 - _st.x, _st.y );
  }
  return _st;
}
"#;

const CHECKERS: &str = r#"
vec3 checkers( vec3 pos, vec3 normal, float size, vec3 color1, vec3 color2 ) {
  vec3 tex;
  pos = pos * size;
  if( ( int( floor( pos.x ) + floor( pos.y ) + floor( pos.z ) ) & 1 ) == 0 ) {
    tex = color1;
  } else {
    tex = color2;
  }
  return tex;
}
"#;

const CHECKERS_2D: &str = r#"
vec3 checkers2d( vec2 uv, vec3 normal, float size, vec3 color1, vec3 color2 ) {
  float fmodResult = mod( floor( size * uv.x ) + floor( size * uv.y ), 2.0 );
  return mix( color1, color2, max( sign( fmodResult ), 0.0 ) );
}
"#;

const NOISE_3D: &str = r#"
vec3 noise3d( vec3 pos, vec3 normal, float scale, float time ) {
  float n = snoise( pos * scale + vec3( 0.0, 0.0, time ) );
  return vec3( n );
}
"#;

const NOISE_2D: &str = r#"
vec3 noise2d( vec2 st, vec3 nor, float scale, float time ) {
  float col = snoise( vec3( st, time ) * scale );
  return vec3( col );
}
"#;

const TRUCHET_2D: &str = r#"
vec3 truchet2d( vec2 st, vec3 nor, float scale, vec3 color ) {
  st = st * scale;
  vec2 ipos = floor( st );
  vec2 fpos = fract( st );

  vec2 tile = truchetPattern( fpos, random_truchet( ipos ) );

  float col = smoothstep( tile.x - 0.3, tile.x, tile.y ) - smoothstep( tile.x, tile.x + .3, tile.y );
  return color * col;
}
"#;

const DOTS: &str = r#"
vec3 dots( vec3 pos, vec3 nor, float scale, vec3 color ) {
  return vec3( color - smoothstep( 0.3, 0.32, length( fract( pos * ( round( scale / 2. ) + .5 ) ) - .5 ) ) );
}
"#;

const STRIPES: &str = r#"
vec3 stripes( vec3 pos, vec3 nor, float scale, vec3 color ) {
  return vec3( color - smoothstep( 0.3, 0.32, length( fract( ( pos.x + pos.y + pos.z ) * scale ) - .5 ) ) );
}
"#;

const CELLULAR: &str = r#"
vec3 cellular( vec3 pos, vec3 nor, float scale, float jitter, float mode, float strength ) {
  vec2 w = worley3D( pos * scale, jitter, false );
  vec3 o;
  if( mode == 0. ) {
    o = vec3( w.x );
  } else if( mode == 1. ) {
    o = vec3( w.y );
  } else {
    o = vec3( w.y - w.x );
  }
  return o * strength;
}
"#;

const VORONOI: &str = r#"
vec3 voronoi( vec3 pos, vec3 nor, float scale, float res, float time, float mode ) {
  vec3 v = voronoi_3d( pos * scale + vec3( 0.0, 0.0, time ), res );
  return voronoi_select( v, mode );
}
"#;

const VORONOI_2D: &str = r#"
vec3 voronoi2d( vec2 st, vec3 nor, float scale, float res, float time, float mode ) {
  vec3 v = voronoi_3d( vec3( st * scale, time ), res );
  return voronoi_select( v, mode );
}
"#;

/// The texture types shipped with the crate, in catalog order.
pub fn texture_types() -> Vec<TextureType> {
    vec![
        TextureType::new("checkers")
            .with_solid(TextureSource::new("checkers", CHECKERS))
            .with_planar(TextureSource::new("checkers2d", CHECKERS_2D))
            .with_parameter("size", Float, &[5.0])
            .with_parameter("color1", Vec3, &[1.0, 1.0, 1.0])
            .with_parameter("color2", Vec3, &[0.0, 0.0, 0.0]),
        TextureType::new("noise")
            .with_solid(TextureSource::new("noise3d", NOISE_3D).with_helper(SIMPLEX_NOISE_3D))
            .with_planar(TextureSource::new("noise2d", NOISE_2D).with_helper(SIMPLEX_NOISE_3D))
            .with_parameter("scale", Float, &[2.0])
            .with_parameter("time", Float, &[1.0]),
        TextureType::new("truchet")
            .with_planar(TextureSource::new("truchet2d", TRUCHET_2D).with_helper(TRUCHET_HELPERS))
            .with_parameter("scale", Float, &[10.0])
            .with_parameter("color", Vec3, &[1.0, 1.0, 1.0]),
        TextureType::new("dots")
            .with_solid(TextureSource::new("dots", DOTS))
            .with_parameter("scale", Float, &[5.0])
            .with_parameter("color", Vec3, &[1.0, 1.0, 1.0]),
        TextureType::new("stripes")
            .with_solid(TextureSource::new("stripes", STRIPES))
            .with_parameter("scale", Float, &[5.0])
            .with_parameter("color", Vec3, &[1.0, 1.0, 1.0]),
        TextureType::new("cellular")
            .with_solid(TextureSource::new("cellular", CELLULAR).with_helper(WORLEY_NOISE_3D))
            .with_parameter("scale", Float, &[1.0])
            .with_parameter("jitter", Float, &[1.0])
            .with_parameter("mode", Float, &[0.0])
            .with_parameter("strength", Float, &[2.0]),
        TextureType::new("voronoi")
            .with_solid(TextureSource::new("voronoi", VORONOI).with_helper(VORONOI_3D))
            .with_planar(TextureSource::new("voronoi2d", VORONOI_2D).with_helper(VORONOI_3D))
            .with_parameter("scale", Float, &[1.0])
            .with_parameter("res", Float, &[100.0])
            .with_parameter("time", Float, &[1.0])
            .with_parameter("mode", Float, &[0.0]),
    ]
}
