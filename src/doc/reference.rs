/*!
# RODEO Language Reference

A RODEO script is a sequence of statements, each ended by a semicolon
or a brace-delimited block. Whitespace and newlines carry no meaning.
A `#` starts a comment that runs to the end of the line. Keywords are
lowercase and case-sensitive. The only values are 32-bit integers.

## Actuator commands

<pre><code>speed 80;          # drive speed, clamped to 0..100
torque 65;         # drive torque, clamped to 0..100
yaw 12;            # degrees per step, unclamped
brake 1;           # any nonzero engages, 0 releases
wait 500;          # milliseconds, handed to the actuator driver
pattern swirl;     # calm, swirl or aggressive
</code></pre>

Speed and torque are safety-clamped: `speed 150;` stores 100 and
`speed 0 - 20;` stores 0. The brake stores exactly 0 or 1.

## Variables and expressions

<pre><code>lean = 3;
lean = lean * 2 + 1;
</code></pre>

Variables hold integers and spring into existence on first assignment.
Reading a name that was never written yields 0. There is room for 100
distinct names; an assignment past that limit is dropped with a
warning. Expressions use `+ - * /` with the usual precedence and
parentheses. Division truncates toward zero; division by zero warns
and evaluates to 0 instead of stopping the ride.

## Sensors

<pre><code>read rider -> r;      # 1 when a rider is seated
read tilt -> t;       # degrees, derived from speed and yaw
read rpm -> s;        # speed * 10
read emergency -> e;  # 1 once the emergency stop has latched
read time_ms -> ms;   # milliseconds since the machine started
</code></pre>

A sensor read simulates the rig's sensor pack and stores the value
into the named variable.

## Control flow

<pre><code>i = 0;
while (i &lt; 3) {
    yaw i * 10;
    i = i + 1;
}
if (i == 3) { speed 40; } else { brake 1; }
</code></pre>

Conditions compare two expressions with `== != > < >= <=`. Blocks are
always brace-delimited, so an `else` can never attach to the wrong
`if`. A `while` body runs at most 10000 times; past that the loop is
forcibly exited with a warning and the script continues after it.

*/
